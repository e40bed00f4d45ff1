// src/noyau/trig.rs
//
// Trig en mode degrés / radians
// -----------------------------
// - Le mode d’angle est un réglage de session, jamais une partie de l’AST
// - Conversion degrés -> radians AVANT l’appel à sin/cos/tan

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    /// Angle saisi -> radians.
    pub fn en_radians(self, angle: f64) -> f64 {
        match self {
            ModeAngle::Degres => angle * std::f64::consts::PI / 180.0,
            ModeAngle::Radians => angle,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    pub fn applique(self, angle: f64, mode: ModeAngle) -> f64 {
        let r = mode.en_radians(angle);
        match self {
            TrigFn::Sin => r.sin(),
            TrigFn::Cos => r.cos(),
            TrigFn::Tan => r.tan(),
        }
    }
}
