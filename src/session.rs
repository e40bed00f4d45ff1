// src/session.rs
//
// Session de calcul : module racine
// ---------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + saisie.rs)
// - Ré-exporter Session (pour l’appelant: use calculatrice_sci::Session;)
//
// Une session possède exactement UNE portée : une seule évaluation à la fois
// (les noyaux réécrivent x dans cette portée pendant l’échantillonnage).

pub mod etat;
pub mod saisie;

pub use etat::Session;
pub use saisie::preparer_saisie;
