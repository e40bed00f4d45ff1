// src/noyau/fonctions.rs
//
// Bibliothèque de fonctions (registre fermé, construit une fois, tenu par l’évaluateur).
// - sin/cos/tan : passent par le mode d’angle
// - ln = log naturel, log = base 10
// - fact : factorielle EXACTE (BigInt), bornée à 5000
// - integral / deriv : enregistrées pour le parse, mais interceptées par l’évaluateur
//   (leur 1er argument reste une expression non évaluée)

use std::collections::HashMap;

use num_bigint::BigInt;
use num_traits::One;

use super::erreur::{ErreurCalc, Resultat};
use super::trig::{ModeAngle, TrigFn};
use super::valeur::Valeur;

/// Plafond de la factorielle (coût de calcul borné).
pub const FACT_MAX: u32 = 5000;

#[derive(Clone, Copy, Debug)]
pub enum Fonction {
    Reelle(fn(f64) -> f64),
    Trig(TrigFn),
    Factorielle,
    Integrale,
    Derivee,
}

impl Fonction {
    /// Nombre d’arguments exigé.
    pub fn arite(self) -> usize {
        match self {
            Fonction::Reelle(_) | Fonction::Trig(_) | Fonction::Factorielle => 1,
            Fonction::Integrale => 3,
            Fonction::Derivee => 2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Bibliotheque {
    table: HashMap<&'static str, Fonction>,
}

impl Default for Bibliotheque {
    fn default() -> Self {
        Self::standard()
    }
}

impl Bibliotheque {
    pub fn standard() -> Self {
        let entrees: [(&'static str, Fonction); 13] = [
            ("sin", Fonction::Trig(TrigFn::Sin)),
            ("cos", Fonction::Trig(TrigFn::Cos)),
            ("tan", Fonction::Trig(TrigFn::Tan)),
            ("ln", Fonction::Reelle(f64::ln)),
            ("log", Fonction::Reelle(f64::log10)),
            ("sqrt", Fonction::Reelle(f64::sqrt)),
            ("abs", Fonction::Reelle(f64::abs)),
            ("exp", Fonction::Reelle(f64::exp)),
            ("floor", Fonction::Reelle(f64::floor)),
            ("ceil", Fonction::Reelle(f64::ceil)),
            ("fact", Fonction::Factorielle),
            ("integral", Fonction::Integrale),
            ("deriv", Fonction::Derivee),
        ];

        Self {
            table: entrees.into_iter().collect(),
        }
    }

    pub fn get(&self, nom: &str) -> Option<Fonction> {
        self.table.get(nom).copied()
    }

    /// Utilisé par le parse : un identifiant est un appel seulement s’il est enregistré.
    pub fn contient(&self, nom: &str) -> bool {
        self.table.contains_key(nom)
    }

    pub fn noms(&self) -> Vec<&'static str> {
        let mut v: Vec<&'static str> = self.table.keys().copied().collect();
        v.sort_unstable();
        v
    }

    /// Appel d’une fonction ordinaire sur des arguments déjà convertis en f64.
    pub fn appelle(&self, nom: &str, args: &[f64], mode: ModeAngle) -> Resultat<Valeur> {
        let f = self
            .get(nom)
            .ok_or_else(|| ErreurCalc::FonctionInconnue(nom.to_string()))?;
        verifie_arite(nom, f, args.len())?;

        match f {
            Fonction::Reelle(g) => Ok(Valeur::Reel(g(args[0]))),
            Fonction::Trig(t) => Ok(Valeur::Reel(t.applique(args[0], mode))),
            Fonction::Factorielle => Ok(Valeur::Entier(factorielle(args[0])?)),
            Fonction::Integrale | Fonction::Derivee => Err(ErreurCalc::NonSupporte(format!(
                "{nom} exige une expression, pas des nombres"
            ))),
        }
    }
}

pub fn verifie_arite(nom: &str, f: Fonction, recu: usize) -> Resultat<()> {
    let attendu = f.arite();
    if recu != attendu {
        return Err(ErreurCalc::Arite {
            fonction: nom.to_string(),
            attendu,
            recu,
        });
    }
    Ok(())
}

/// n! exact. Refuse : négatif, non entier, NaN, > FACT_MAX.
pub fn factorielle(n: f64) -> Resultat<BigInt> {
    if n.is_nan() || n.fract() != 0.0 {
        return Err(ErreurCalc::Plage(format!("fact: argument non entier ({n})")));
    }
    if n < 0.0 {
        return Err(ErreurCalc::Plage("fact: argument négatif".into()));
    }
    if n > f64::from(FACT_MAX) {
        return Err(ErreurCalc::Plage(format!("fact: limite {FACT_MAX} dépassée")));
    }

    let n = n as u32;
    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= k;
    }
    Ok(acc)
}
