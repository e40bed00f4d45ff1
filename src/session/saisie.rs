// src/session/saisie.rs
//
// Règles de saisie (clavier virtuel -> texte d’entrée)
// - chiffres : un seul '.' par opérande, longueur bornée, "0" initial remplacé
// - opérateurs : une suite d’opérateurs en fin d’entrée est remplacée (sauf '-' unaire)
// - fonctions : '*' implicite après chiffre / '.' / ')' / x
// - effacement : un nom de fonction "sin(" part d’un bloc
//
// preparer_saisie : normalisation juste avant l’évaluation (×, ÷, π, parenthèses ouvertes).

use super::etat::{Session, TEXTE_ERREUR};
use crate::noyau::format::reel_vers_texte;

const OPERATEURS: &[char] = &['+', '-', '*', '/', '%', '^'];

/// Symboles d’affichage -> opérateurs du noyau, puis fermeture des parenthèses restées ouvertes.
pub fn preparer_saisie(entree: &str) -> String {
    let mut s = entree.replace('×', "*").replace('÷', "/").replace('π', "PI");

    let ouvertes = s.chars().filter(|&c| c == '(').count();
    let fermees = s.chars().filter(|&c| c == ')').count();
    for _ in fermees..ouvertes {
        s.push(')');
    }
    s
}

/// Plus long préfixe lisible comme flottant ("12.5+3" -> 12.5).
fn reel_prefixe(s: &str) -> Option<f64> {
    let s = s.trim_start();
    s.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|fin| s[..fin].parse::<f64>().ok())
}

fn est_entree_vide(entree: &str) -> bool {
    entree == "0" || entree == TEXTE_ERREUR
}

impl Session {
    /// Chiffre ou '.'.
    pub fn ajoute_chiffre(&mut self, n: char) {
        if self.nouvelle_saisie {
            self.entree = if n == '.' { "0.".to_string() } else { n.to_string() };
            self.nouvelle_saisie = false;
            return;
        }

        let operande = self.entree.rsplit(OPERATEURS).next().unwrap_or("");
        if n == '.' && operande.contains('.') {
            return;
        }
        if self.entree.chars().count() >= self.reglages().chiffres_max {
            return;
        }

        if self.entree == "0" && n != '.' {
            self.entree = n.to_string();
        } else {
            self.entree.push(n);
        }
    }

    /// Opérateur binaire, ou '%' (divise la valeur affichée par 100).
    pub fn ajoute_operateur(&mut self, op: char) {
        if op == '%' {
            if let Some(x) = reel_prefixe(&self.entree) {
                self.entree = reel_vers_texte(x / 100.0);
            }
            self.nouvelle_saisie = true;
            return;
        }

        if self.entree == TEXTE_ERREUR {
            self.entree = "0".to_string();
        }

        let base = self.entree.trim_end_matches(OPERATEURS).len();
        let dernier = self.entree[base..].chars().last();

        match dernier {
            Some(dernier) if !self.nouvelle_saisie => {
                if op == '-' && dernier != '-' {
                    self.entree.push(op);
                } else {
                    self.entree.truncate(base);
                    self.entree.push(op);
                }
            }
            _ => self.entree.push(op),
        }
        self.nouvelle_saisie = false;
    }

    /// Appel de fonction : `f` vaut par ex. "sin(".
    pub fn ajoute_fonction(&mut self, f: &str) {
        if est_entree_vide(&self.entree) {
            self.entree = f.to_string();
            self.nouvelle_saisie = false;
            return;
        }

        let implicite = self
            .entree
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ')' || c == 'x');
        if !self.nouvelle_saisie && implicite {
            self.entree.push('*');
        }
        self.entree.push_str(f);
        self.nouvelle_saisie = false;
    }

    /// Texte brut : '(' ')' ',' '=' x, lettres de variables…
    pub fn ajoute_symbole(&mut self, s: &str) {
        if est_entree_vide(&self.entree) && s != ")" && s != "," && s != "=" {
            self.entree = s.to_string();
        } else {
            self.entree.push_str(s);
        }
        self.nouvelle_saisie = false;
    }

    /// Retour arrière. Déverrouille l’entrée après "=".
    pub fn efface(&mut self) {
        self.nouvelle_saisie = false;

        if self.entree == TEXTE_ERREUR {
            self.entree = "0".to_string();
            return;
        }

        // Retire "nom(" d’un bloc
        let bloc = self
            .bibliotheque()
            .noms()
            .into_iter()
            .map(|nom| format!("{nom}("))
            .filter(|pat| self.entree.ends_with(pat.as_str()))
            .map(|pat| pat.len())
            .max();

        match bloc {
            Some(n) => {
                let fin = self.entree.len() - n;
                self.entree.truncate(fin);
            }
            None => {
                self.entree.pop();
            }
        }

        if self.entree.is_empty() {
            self.entree = "0".to_string();
        }
    }
}
