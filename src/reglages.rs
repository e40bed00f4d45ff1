//! Réglages de session : défauts intégrés + TOML optionnel.
//!
//! - `Reglages::default()`           → degrés, 100 caractères de saisie
//! - `Reglages::depuis_toml(txt)`    → champs absents = valeur par défaut
//! - `Reglages::depuis_fichier(p)`   / `enregistrer(p)`
//!
//! Les constantes des noyaux numériques (profondeur 20, h = 0.001, …) ne sont PAS réglables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noyau::ModeAngle;

/// Longueur max de la saisie (garde-fou UI).
pub const CHIFFRES_MAX_DEFAUT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub mode_angle: ModeAngle,
    pub chiffres_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode_angle: ModeAngle::default(),
            chiffres_max: CHIFFRES_MAX_DEFAUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErreurReglages {
    #[error("lecture/écriture {chemin}: {source}")]
    Fichier {
        chemin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML invalide: {0}")]
    Lecture(#[from] toml::de::Error),

    #[error("sérialisation TOML: {0}")]
    Ecriture(#[from] toml::ser::Error),
}

impl Reglages {
    pub fn depuis_toml(txt: &str) -> Result<Self, ErreurReglages> {
        Ok(toml::from_str(txt)?)
    }

    pub fn vers_toml(&self) -> Result<String, ErreurReglages> {
        Ok(toml::to_string(self)?)
    }

    pub fn depuis_fichier(chemin: &Path) -> Result<Self, ErreurReglages> {
        let txt = fs::read_to_string(chemin).map_err(|source| ErreurReglages::Fichier {
            chemin: chemin.display().to_string(),
            source,
        })?;
        Self::depuis_toml(&txt)
    }

    pub fn enregistrer(&self, chemin: &Path) -> Result<(), ErreurReglages> {
        let txt = self.vers_toml()?;
        fs::write(chemin, txt).map_err(|source| ErreurReglages::Fichier {
            chemin: chemin.display().to_string(),
            source,
        })
    }
}
