// src/noyau/valeur.rs
//
// Valeur numérique hybride : entier non borné OU f64.
//
// Règles de promotion (explicites, jamais implicites) :
// - Entier ⊕ Entier reste Entier pour + - * %
// - ^ : exposant entier >= 0 reste exact (si la taille du résultat est bornée),
//       exposant négatif => passage en f64
// - / : toujours f64 (pas de division entière tronquée)
// - dès qu’un opérande est Reel, tout passe en f64

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::{ErreurCalc, Resultat};
use super::expr::OpBinaire;
use super::format::reel_vers_texte;

/// Garde-fou : taille max (en bits) d’une puissance exacte.
/// Au-delà on bascule en f64 (anti-gel).
const MAX_BITS_PUISSANCE: u64 = 1 << 22;

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Entier(BigInt),
    Reel(f64),
}

impl Valeur {
    pub fn entier(n: i64) -> Valeur {
        Valeur::Entier(BigInt::from(n))
    }

    pub fn est_entier(&self) -> bool {
        matches!(self, Valeur::Entier(_))
    }

    pub fn est_nan(&self) -> bool {
        matches!(self, Valeur::Reel(x) if x.is_nan())
    }

    /// Conversion vers f64 (saturée à ±∞ pour les très grands entiers).
    pub fn en_reel(&self) -> f64 {
        match self {
            Valeur::Entier(n) => big_vers_f64(n),
            Valeur::Reel(x) => *x,
        }
    }

    /// Négation : conserve la nature (Entier reste Entier).
    pub fn negation(self) -> Valeur {
        match self {
            Valeur::Entier(n) => Valeur::Entier(-n),
            Valeur::Reel(x) => Valeur::Reel(-x),
        }
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Entier(n) => write!(f, "{n}"),
            Valeur::Reel(x) => write!(f, "{}", reel_vers_texte(*x)),
        }
    }
}

pub fn big_vers_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(if n.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}

/// Applique un opérateur binaire selon les règles de promotion.
pub fn applique(op: OpBinaire, a: Valeur, b: Valeur) -> Resultat<Valeur> {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => applique_entiers(op, x, y),
        (a, b) => applique_reels(op, a.en_reel(), b.en_reel()),
    }
}

fn applique_entiers(op: OpBinaire, x: BigInt, y: BigInt) -> Resultat<Valeur> {
    match op {
        OpBinaire::Add => Ok(Valeur::Entier(x + y)),
        OpBinaire::Sub => Ok(Valeur::Entier(x - y)),
        OpBinaire::Mul => Ok(Valeur::Entier(x * y)),
        OpBinaire::Mod => {
            if y.is_zero() {
                return Err(ErreurCalc::DivisionParZero);
            }
            // reste tronqué : signe du dividende
            Ok(Valeur::Entier(x % y))
        }
        OpBinaire::Pow => {
            if y.is_negative() {
                applique_reels(op, big_vers_f64(&x), big_vers_f64(&y))
            } else {
                Ok(puissance_entiere(x, y))
            }
        }
        OpBinaire::Div => applique_reels(op, big_vers_f64(&x), big_vers_f64(&y)),
    }
}

/// base^exp avec exp >= 0.
fn puissance_entiere(base: BigInt, exp: BigInt) -> Valeur {
    // Bases triviales : exactes pour tout exposant.
    if base.is_zero() {
        return Valeur::Entier(if exp.is_zero() {
            BigInt::one()
        } else {
            BigInt::zero()
        });
    }
    if base.is_one() {
        return Valeur::Entier(BigInt::one());
    }
    if base == BigInt::from(-1) {
        let pair = (&exp % BigInt::from(2)).is_zero();
        return Valeur::entier(if pair { 1 } else { -1 });
    }

    match exp.to_u32() {
        Some(e) if base.bits().saturating_mul(u64::from(e)) <= MAX_BITS_PUISSANCE => {
            Valeur::Entier(base.pow(e))
        }
        _ => Valeur::Reel(big_vers_f64(&base).powf(big_vers_f64(&exp))),
    }
}

fn applique_reels(op: OpBinaire, x: f64, y: f64) -> Resultat<Valeur> {
    let v = match op {
        OpBinaire::Add => x + y,
        OpBinaire::Sub => x - y,
        OpBinaire::Mul => x * y,
        OpBinaire::Div => {
            if y == 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            x / y
        }
        OpBinaire::Mod => {
            if y == 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            x % y
        }
        OpBinaire::Pow => x.powf(y),
    };
    Ok(Valeur::Reel(v))
}
