// src/noyau/syntaxe.rs
//
// Descente récursive : jetons -> Noeud
//
// Grammaire (de la plus faible à la plus forte liaison) :
//   expression  := affectation
//   affectation := addition ['=' expression]          (droite)
//   addition    := terme (('+' | '-') terme)*
//   terme       := facteur ((op | implicite) facteur)*   op ∈ * / % ^
//   facteur     := ('+' | '-') facteur | puissance
//   puissance   := atome ['^' facteur]                 (droite : 2^3^2 = 2^9)
//   atome       := nombre | appel | variable | '(' expression ')'
//
// Multiplication implicite : si après un facteur vient un nombre, un identifiant
// ou '(' on fabrique un '*' sans consommer de jeton (2x, 2sin(30), (2)(3)).
//
// Appel : seulement si l’identifiant est dans la Bibliotheque.
//   - nom '(' args ')'  avec args séparés par ','
//   - nom facteur       (forme commande : "sin 30 + 1" = sin(30) + 1)

use super::erreur::{ErreurCalc, Resultat};
use super::expr::{Noeud, OpBinaire, OpUnaire};
use super::fonctions::Bibliotheque;
use super::jetons::Jeton;

/// Garde-fou : taille maximale d’une expression (en jetons).
const MAX_JETONS: usize = 512;

/// Garde-fou : profondeur de récursion du parse (pile bornée).
const MAX_IMBRICATION: usize = 128;

/// Construit l’AST ; échoue si la suite de jetons n’est pas entièrement consommée.
pub fn parse(jetons: &[Jeton], biblio: &Bibliotheque) -> Resultat<Noeud> {
    if jetons.len() > MAX_JETONS {
        return Err(ErreurCalc::syntaxe(format!(
            "expression trop longue ({} jetons, max {MAX_JETONS})",
            jetons.len()
        )));
    }

    let mut p = Parseur {
        jetons,
        pos: 0,
        biblio,
        profondeur: 0,
    };

    let racine = p.expression()?;
    if let Some(j) = p.peek() {
        return Err(ErreurCalc::syntaxe(format!("jeton inattendu: {}", j.texte())));
    }
    Ok(racine)
}

struct Parseur<'a> {
    jetons: &'a [Jeton],
    pos: usize,
    biblio: &'a Bibliotheque,
    profondeur: usize,
}

impl<'a> Parseur<'a> {
    fn peek(&self) -> Option<&'a Jeton> {
        self.jetons.get(self.pos)
    }

    fn suivant(&mut self) -> Option<&'a Jeton> {
        let j = self.jetons.get(self.pos);
        if j.is_some() {
            self.pos += 1;
        }
        j
    }

    fn voit_op(&self, c: char) -> bool {
        self.peek().is_some_and(|j| j.est_op(c))
    }

    fn attend_fermante(&mut self) -> Resultat<()> {
        if !self.voit_op(')') {
            return Err(ErreurCalc::syntaxe("')' manquante"));
        }
        self.pos += 1;
        Ok(())
    }

    fn imbrique(
        &mut self,
        regle: impl FnOnce(&mut Self) -> Resultat<Noeud>,
    ) -> Resultat<Noeud> {
        self.profondeur += 1;
        if self.profondeur > MAX_IMBRICATION {
            return Err(ErreurCalc::syntaxe("imbrication trop profonde"));
        }
        let out = regle(self);
        self.profondeur -= 1;
        out
    }

    fn expression(&mut self) -> Resultat<Noeud> {
        self.imbrique(Self::affectation)
    }

    fn affectation(&mut self) -> Resultat<Noeud> {
        let gauche = self.addition()?;
        if self.voit_op('=') {
            self.pos += 1;
            let droite = self.expression()?;
            return Ok(Noeud::Affecte(Box::new(gauche), Box::new(droite)));
        }
        Ok(gauche)
    }

    fn addition(&mut self) -> Resultat<Noeud> {
        let mut gauche = self.terme()?;
        loop {
            let op = match self.peek() {
                Some(Jeton::Op('+')) => OpBinaire::Add,
                Some(Jeton::Op('-')) => OpBinaire::Sub,
                _ => break,
            };
            self.pos += 1;
            let droite = self.terme()?;
            gauche = Noeud::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn terme(&mut self) -> Resultat<Noeud> {
        let mut gauche = self.facteur()?;
        loop {
            let op = match self.peek() {
                Some(Jeton::Op('*')) => Some(OpBinaire::Mul),
                Some(Jeton::Op('/')) => Some(OpBinaire::Div),
                Some(Jeton::Op('%')) => Some(OpBinaire::Mod),
                Some(Jeton::Op('^')) => Some(OpBinaire::Pow),
                // implicite : rien à consommer
                Some(Jeton::Nombre(_)) | Some(Jeton::Ident(_)) | Some(Jeton::Op('(')) => None,
                _ => break,
            };

            let op = match op {
                Some(op) => {
                    self.pos += 1;
                    op
                }
                None => OpBinaire::Mul,
            };

            let droite = self.facteur()?;
            gauche = Noeud::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn facteur(&mut self) -> Resultat<Noeud> {
        self.imbrique(|p| {
            let op = match p.peek() {
                Some(Jeton::Op('-')) => OpUnaire::Neg,
                Some(Jeton::Op('+')) => OpUnaire::Id,
                _ => return p.puissance(),
            };
            p.pos += 1;
            let operande = p.facteur()?;
            Ok(Noeud::unaire(op, operande))
        })
    }

    fn puissance(&mut self) -> Resultat<Noeud> {
        let base = self.atome()?;
        if self.voit_op('^') {
            self.pos += 1;
            let exposant = self.facteur()?;
            return Ok(Noeud::binaire(OpBinaire::Pow, base, exposant));
        }
        Ok(base)
    }

    fn atome(&mut self) -> Resultat<Noeud> {
        let j = self
            .suivant()
            .ok_or_else(|| ErreurCalc::syntaxe("expression incomplète"))?;

        match j {
            Jeton::Nombre(s) => Ok(Noeud::Nombre(s.clone())),
            Jeton::Ident(nom) if self.biblio.contient(nom) => self.appel(nom),
            Jeton::Ident(nom) => Ok(Noeud::Var(nom.clone())),
            Jeton::Op('(') => {
                let e = self.expression()?;
                self.attend_fermante()?;
                Ok(e)
            }
            Jeton::Op(c) => Err(ErreurCalc::syntaxe(format!("jeton inattendu: {c}"))),
        }
    }

    fn appel(&mut self, nom: &str) -> Resultat<Noeud> {
        let mut args = Vec::new();

        if self.voit_op('(') {
            self.pos += 1;
            if !self.voit_op(')') {
                loop {
                    args.push(self.expression()?);
                    if self.voit_op(',') {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
            }
            self.attend_fermante()?;
        } else {
            // forme commande : un seul argument, niveau facteur
            args.push(self.facteur()?);
        }

        Ok(Noeud::Appel(nom.to_string(), args))
    }
}
