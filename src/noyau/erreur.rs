// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - Une variante par échec concret (message précis pour la démarche)
// - genre() ramène chaque variante à l’une des 5 familles visibles côté UI

use thiserror::Error;

/// Les cinq familles d’échec du pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreErreur {
    /// Caractère non reconnu par la tokenisation.
    Lex,
    /// Suite de jetons mal formée (parenthèse manquante, jeton en trop, atome incomplet).
    Syntaxe,
    /// Échec d’évaluation (variable inconnue, division par zéro, combinaison non supportée).
    Eval,
    /// Argument hors bornes (factorielle).
    Plage,
    /// Résultat final NaN.
    PasUnNombre,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalc {
    #[error("caractère inattendu: '{0}'")]
    Lex(char),

    #[error("syntaxe: {0}")]
    Syntaxe(String),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("variable inconnue: {0}")]
    VariableInconnue(String),

    #[error("fonction inconnue: {0}")]
    FonctionInconnue(String),

    #[error("{fonction} attend {attendu} argument(s), reçu {recu}")]
    Arite {
        fonction: String,
        attendu: usize,
        recu: usize,
    },

    #[error("division par zéro")]
    DivisionParZero,

    #[error("opération non supportée: {0}")]
    NonSupporte(String),

    #[error("hors limites: {0}")]
    Plage(String),

    #[error("résultat non numérique (NaN)")]
    PasUnNombre,
}

impl ErreurCalc {
    pub fn genre(&self) -> GenreErreur {
        use ErreurCalc::*;

        match self {
            Lex(_) => GenreErreur::Lex,
            Syntaxe(_) | NombreInvalide(_) => GenreErreur::Syntaxe,
            VariableInconnue(_)
            | FonctionInconnue(_)
            | Arite { .. }
            | DivisionParZero
            | NonSupporte(_) => GenreErreur::Eval,
            Plage(_) => GenreErreur::Plage,
            PasUnNombre => GenreErreur::PasUnNombre,
        }
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalc::Syntaxe(msg.into())
    }
}

pub type Resultat<T> = Result<T, ErreurCalc>;
