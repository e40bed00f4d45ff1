// src/lib.rs
//
// Calculatrice scientifique : bibliothèque
// ----------------------------------------
// - noyau    : jetons -> AST -> évaluation hybride (BigInt / f64) + intégrale / dérivée
// - session  : saisie clavier, historique, mémoire, une portée de variables
// - reglages : mode d’angle + bornes de saisie (TOML optionnel)
//
// Pas de subscriber tracing ici : l’appelant installe le sien.

pub mod noyau;
pub mod reglages;
pub mod session;

pub use noyau::{
    eval_detaille, eval_expression, Bibliotheque, Demarche, ErreurCalc, GenreErreur, ModeAngle,
    Portee, Resultat, Valeur,
};
pub use reglages::{ErreurReglages, Reglages};
pub use session::Session;
