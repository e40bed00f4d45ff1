// src/noyau/jetons.rs

use super::erreur::{ErreurCalc, Resultat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    // Texte brut du nombre : entier ou flottant décidé à l’évaluation.
    Nombre(String),

    // Fonctions + variables (le parse décidera lequel des deux).
    Ident(String),

    // + - * / % ^ ( ) , =
    Op(char),
}

impl Jeton {
    pub fn texte(&self) -> String {
        match self {
            Jeton::Nombre(s) | Jeton::Ident(s) => s.clone(),
            Jeton::Op(c) => c.to_string(),
        }
    }

    pub fn est_op(&self, c: char) -> bool {
        matches!(self, Jeton::Op(o) if *o == c)
    }
}

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '^' | '(' | ')' | ',' | '=')
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres [0-9.]+ avec exposant optionnel e/E[+-]chiffres (ex: 12.5e+3)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée : PI ≠ pi pour la portée)
/// - opérateurs + - * / % ^ ( ) , =
///
/// L’exposant n’est pris que si un chiffre suit vraiment : "12.5e" donne
/// Nombre("12.5") puis Ident("e").
pub fn tokenize(s: &str) -> Resultat<Vec<Jeton>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    let chiffre_en = |k: usize| k < chars.len() && chars[k].is_ascii_digit();

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : chiffres et points, puis exposant éventuel
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }

            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let signe = i + 1 < chars.len() && (chars[i + 1] == '+' || chars[i + 1] == '-');
                let premier_chiffre = if signe { i + 2 } else { i + 1 };
                if chiffre_en(premier_chiffre) {
                    i = premier_chiffre;
                    while chiffre_en(i) {
                        i += 1;
                    }
                }
            }

            out.push(Jeton::Nombre(chars[start..i].iter().collect()));
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Jeton::Ident(chars[start..i].iter().collect()));
            continue;
        }

        if est_operateur(c) {
            out.push(Jeton::Op(c));
            i += 1;
            continue;
        }

        return Err(ErreurCalc::Lex(c));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Jeton]) -> String {
    tokens
        .iter()
        .map(Jeton::texte)
        .collect::<Vec<_>>()
        .join(" ")
}
