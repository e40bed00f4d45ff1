// src/noyau/portee.rs
//
// Portée : nom -> Valeur, possédée par la session, passée par &mut à chaque évaluation.
// - Constantes implicites PI / E (la portée les masque si l’utilisateur les redéfinit)
// - Variable liée x : vaut 0 hors d’un noyau numérique

use std::collections::HashMap;

use super::erreur::{ErreurCalc, Resultat};
use super::valeur::Valeur;

/// Variable réécrite par integral / deriv à chaque échantillon.
pub const VARIABLE_LIEE: &str = "x";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Portee {
    vars: HashMap<String, Valeur>,
}

impl Portee {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, nom: &str) -> Option<&Valeur> {
        self.vars.get(nom)
    }

    pub fn definir(&mut self, nom: impl Into<String>, v: Valeur) {
        self.vars.insert(nom.into(), v);
    }

    pub fn retirer(&mut self, nom: &str) -> Option<Valeur> {
        self.vars.remove(nom)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Valeur)> {
        self.vars.iter()
    }

    /// Résolution d’une variable : portée, puis constantes, puis x = 0.
    pub fn lire(&self, nom: &str) -> Resultat<Valeur> {
        if let Some(v) = self.vars.get(nom) {
            return Ok(v.clone());
        }
        match nom {
            "PI" | "pi" => Ok(Valeur::Reel(std::f64::consts::PI)),
            "E" | "e" => Ok(Valeur::Reel(std::f64::consts::E)),
            VARIABLE_LIEE => Ok(Valeur::Reel(0.0)),
            _ => Err(ErreurCalc::VariableInconnue(nom.to_string())),
        }
    }

    /// Exécute `corps` puis remet `nom` dans l’état d’avant (valeur restaurée ou absente),
    /// même si `corps` échoue.
    pub fn avec_liaison<T>(&mut self, nom: &str, corps: impl FnOnce(&mut Portee) -> T) -> T {
        let ancienne = self.vars.remove(nom);
        let out = corps(self);
        match ancienne {
            Some(v) => {
                self.vars.insert(nom.to_string(), v);
            }
            None => {
                self.vars.remove(nom);
            }
        }
        out
    }
}
