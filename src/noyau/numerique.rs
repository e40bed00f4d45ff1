// src/noyau/numerique.rs
//
// Noyaux numériques (bornés, anti-gel)
// ------------------------------------
// - integral(f, a, b) : Simpson composite (10 sous-intervalles) puis Simpson adaptatif
//   avec correction de Richardson ; profondeur bornée à 20
// - deriv(f, x)       : différence centrée 5 points, h = 0.001
//
// Les deux noyaux réécrivent x dans LA portée de l’appelant à chaque échantillon,
// puis rendent x dans son état d’avant.

use tracing::debug;

use super::erreur::Resultat;
use super::eval::Evaluateur;
use super::expr::Noeud;
use super::portee::{Portee, VARIABLE_LIEE};
use super::valeur::Valeur;

/// Profondeur max du raffinement adaptatif (garantie de terminaison).
pub const PROFONDEUR_MAX: u32 = 20;

/// Nombre de sous-intervalles de l’estimation initiale.
pub const SIMPSON_BASE: u32 = 10;

/// Tolérance initiale (divisée par 2 à chaque niveau).
pub const TOLERANCE: f64 = 1e-6;

/// Pas du gabarit 5 points.
pub const PAS_DERIVEE: f64 = 0.001;

/// Évalue `noeud` avec x = v.
fn echantillon(ev: &Evaluateur<'_>, noeud: &Noeud, portee: &mut Portee, v: f64) -> Resultat<f64> {
    portee.definir(VARIABLE_LIEE, Valeur::Reel(v));
    Ok(ev.eval(noeud, portee)?.en_reel())
}

/// ∫ₐᵇ noeud dx.
///
/// Si la profondeur max est dépassée sur une branche, tout le raffinement restant
/// est coupé et chaque branche en attente rend sa meilleure estimation : on préfère
/// un résultat approché à un gel.
pub fn integrale(
    ev: &Evaluateur<'_>,
    noeud: &Noeud,
    a: f64,
    b: f64,
    portee: &mut Portee,
) -> Resultat<f64> {
    portee.avec_liaison(VARIABLE_LIEE, |portee| {
        let mut f = |v: f64| echantillon(ev, noeud, portee, v);

        // Estimation initiale : Simpson composite
        let n = SIMPSON_BASE;
        let h = (b - a) / f64::from(n);
        let mut s = f(a)? + f(b)?;
        for i in 1..n {
            let poids = if i % 2 == 0 { 2.0 } else { 4.0 };
            s += poids * f(a + f64::from(i) * h)?;
        }
        let initiale = (h / 3.0) * s;

        let mut simpson = Simpson { f, coupe: false };
        let res = simpson.raffine(a, b, TOLERANCE, initiale, 1)?;
        if simpson.coupe {
            debug!(
                a,
                b,
                res,
                max = PROFONDEUR_MAX,
                "integral: profondeur max atteinte, estimation rendue"
            );
        }
        Ok(res)
    })
}

struct Simpson<F> {
    f: F,
    coupe: bool,
}

impl<F> Simpson<F>
where
    F: FnMut(f64) -> Resultat<f64>,
{
    fn raffine(&mut self, a: f64, b: f64, eps: f64, entier: f64, profondeur: u32) -> Resultat<f64> {
        if self.coupe || profondeur > PROFONDEUR_MAX {
            self.coupe = true;
            return Ok(entier);
        }

        let c = (a + b) / 2.0;
        let f = &mut self.f;
        let gauche = (c - a) / 6.0 * (f(a)? + 4.0 * f((a + c) / 2.0)? + f(c)?);
        let droite = (b - c) / 6.0 * (f(c)? + 4.0 * f((c + b) / 2.0)? + f(b)?);
        let somme = gauche + droite;

        if (somme - entier).abs() <= 15.0 * eps {
            return Ok(somme + (somme - entier) / 15.0);
        }

        let g = self.raffine(a, c, eps / 2.0, gauche, profondeur + 1)?;
        let d = self.raffine(c, b, eps / 2.0, droite, profondeur + 1)?;
        Ok(g + d)
    }
}

/// f′(x) par le gabarit centré d’ordre 4 :
/// (-f(x+2h) + 8f(x+h) - 8f(x-h) + f(x-2h)) / 12h
pub fn derivee(ev: &Evaluateur<'_>, noeud: &Noeud, x: f64, portee: &mut Portee) -> Resultat<f64> {
    let h = PAS_DERIVEE;
    portee.avec_liaison(VARIABLE_LIEE, |portee| {
        let mut f = |v: f64| echantillon(ev, noeud, portee, v);
        let p2 = f(x + 2.0 * h)?;
        let p1 = f(x + h)?;
        let m1 = f(x - h)?;
        let m2 = f(x - 2.0 * h)?;
        Ok((-p2 + 8.0 * p1 - 8.0 * m1 + m2) / (12.0 * h))
    })
}
