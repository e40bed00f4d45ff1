//! Noyau : évaluation (pipeline réel)
//!
//! texte -> jetons -> AST (descente récursive) -> Valeur (Entier | Reel)
//!
//! L’évaluation parcourt l’AST contre une portée mutable possédée par l’appelant.
//! integral / deriv sont interceptés AVANT l’évaluation générique : leur 1er argument
//! est transmis tel quel au noyau numérique, qui le ré-évalue pour chaque échantillon.

use std::str::FromStr;

use num_bigint::BigInt;
use tracing::{debug, trace};

use super::erreur::{ErreurCalc, Resultat};
use super::expr::{Noeud, OpUnaire};
use super::fonctions::{verifie_arite, Bibliotheque, Fonction};
use super::jetons::{format_tokens, tokenize};
use super::numerique;
use super::portee::Portee;
use super::syntaxe::parse;
use super::trig::ModeAngle;
use super::valeur::{applique, Valeur};

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
    pub note: String,
}

/// Évaluateur : registre de fonctions + mode d’angle (réglage ambiant, hors AST).
#[derive(Clone, Copy, Debug)]
pub struct Evaluateur<'b> {
    biblio: &'b Bibliotheque,
    mode: ModeAngle,
}

impl<'b> Evaluateur<'b> {
    pub fn new(biblio: &'b Bibliotheque, mode: ModeAngle) -> Self {
        Self { biblio, mode }
    }

    pub fn mode(&self) -> ModeAngle {
        self.mode
    }

    pub fn eval(&self, noeud: &Noeud, portee: &mut Portee) -> Resultat<Valeur> {
        match noeud {
            Noeud::Nombre(s) => lit_nombre(s),

            Noeud::Var(nom) => portee.lire(nom),

            Noeud::Unaire(op, a) => {
                let v = self.eval(a, portee)?;
                Ok(match op {
                    OpUnaire::Neg => v.negation(),
                    OpUnaire::Id => v,
                })
            }

            Noeud::Binaire(op, a, b) => {
                let g = self.eval(a, portee)?;
                let d = self.eval(b, portee)?;
                applique(*op, g, d)
            }

            Noeud::Appel(nom, args) => self.appel(nom, args, portee),

            Noeud::Affecte(cible, valeur) => {
                let Noeud::Var(nom) = cible.as_ref() else {
                    return Err(ErreurCalc::NonSupporte(format!(
                        "affectation: la cible doit être une variable ({cible})"
                    )));
                };
                let v = self.eval(valeur, portee)?;
                portee.definir(nom.clone(), v.clone());
                Ok(v)
            }
        }
    }

    fn appel(&self, nom: &str, args: &[Noeud], portee: &mut Portee) -> Resultat<Valeur> {
        let f = self
            .biblio
            .get(nom)
            .ok_or_else(|| ErreurCalc::FonctionInconnue(nom.to_string()))?;

        match f {
            Fonction::Integrale => {
                verifie_arite(nom, f, args.len())?;
                let a = self.eval(&args[1], portee)?.en_reel();
                let b = self.eval(&args[2], portee)?.en_reel();
                Ok(Valeur::Reel(numerique::integrale(
                    self, &args[0], a, b, portee,
                )?))
            }
            Fonction::Derivee => {
                verifie_arite(nom, f, args.len())?;
                let x = self.eval(&args[1], portee)?.en_reel();
                Ok(Valeur::Reel(numerique::derivee(self, &args[0], x, portee)?))
            }
            Fonction::Reelle(_) | Fonction::Trig(_) | Fonction::Factorielle => {
                let xs = args
                    .iter()
                    .map(|a| self.eval(a, portee).map(|v| v.en_reel()))
                    .collect::<Resultat<Vec<f64>>>()?;
                self.biblio.appelle(nom, &xs, self.mode)
            }
        }
    }
}

/// Littéral : Reel s’il contient '.' ou un exposant, Entier sinon.
fn lit_nombre(s: &str) -> Resultat<Valeur> {
    let invalide = || ErreurCalc::NombreInvalide(s.to_string());

    if s.contains(['.', 'e', 'E']) {
        s.parse::<f64>().map(Valeur::Reel).map_err(|_| invalide())
    } else {
        BigInt::from_str(s).map(Valeur::Entier).map_err(|_| invalide())
    }
}

/// API publique : évalue une expression contre la portée de la session.
///
/// Échoue sur la première erreur rencontrée (aucun résultat partiel) ;
/// un résultat final NaN devient `PasUnNombre`.
pub fn eval_expression(
    biblio: &Bibliotheque,
    texte: &str,
    portee: &mut Portee,
    mode: ModeAngle,
) -> Resultat<Valeur> {
    eval_detaille(biblio, texte, portee, mode).map(|(v, _d)| v)
}

/// Comme `eval_expression`, avec la démarche (jetons + arbre).
pub fn eval_detaille(
    biblio: &Bibliotheque,
    texte: &str,
    portee: &mut Portee,
    mode: ModeAngle,
) -> Resultat<(Valeur, Demarche)> {
    debug!(texte, mode = mode.libelle(), "évaluation");

    // 1) Jetons
    let jetons = tokenize(texte)?;
    let jetons_txt = format_tokens(&jetons);
    trace!(jetons = %jetons_txt);

    // 2) AST
    let arbre = parse(&jetons, biblio)?;
    trace!(arbre = %arbre);

    // 3) Valeur
    let v = Evaluateur::new(biblio, mode).eval(&arbre, portee)?;
    if v.est_nan() {
        return Err(ErreurCalc::PasUnNombre);
    }
    debug!(entier = v.est_entier(), "résultat");

    let d = Demarche {
        jetons: jetons_txt,
        arbre: arbre.to_string(),
        note: "Pipeline: jetons → AST → évaluation (Entier/Reel).".into(),
    };

    Ok((v, d))
}
