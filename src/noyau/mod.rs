//! Noyau de calcul
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation
//! - syntaxe.rs   : descente récursive -> AST
//! - expr.rs      : AST (Noeud) + affichage
//! - valeur.rs    : Entier (BigInt) | Reel (f64) + règles de promotion
//! - portee.rs    : variables de session, constantes, variable liée x
//! - trig.rs      : mode d’angle
//! - fonctions.rs : bibliothèque (sin, ln, fact, integral, deriv…)
//! - numerique.rs : Simpson adaptatif + gabarit 5 points (bornés)
//! - eval.rs      : évaluateur + pipeline complet
//! - format.rs    : arrondi 16 chiffres + rendu écran
//! - erreur.rs    : erreurs typées

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod numerique;
pub mod portee;
pub mod syntaxe;
pub mod trig;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use erreur::{ErreurCalc, GenreErreur, Resultat};
pub use eval::{eval_detaille, eval_expression, Demarche, Evaluateur};
pub use fonctions::Bibliotheque;
pub use portee::Portee;
pub use trig::ModeAngle;
pub use valeur::Valeur;
