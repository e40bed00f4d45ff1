// src/noyau/format.rs
//
// Texte des résultats.
// - texte_resultat : forme canonique (arrondi 16 chiffres significatifs dans la bande “normale”)
// - format_affichage : rendu écran (notation scientifique pour les longs, milliers groupés sinon)

use super::valeur::Valeur;

/// Chiffres significatifs conservés pour un flottant “normal”.
pub const PRECISION: usize = 16;

/// Bande “normale” : en dehors, on laisse le flottant tel quel (rendu scientifique).
const BANDE_MIN: f64 = 1e-9;
const BANDE_MAX: f64 = 1e15;

/// Au-delà de cette longueur, l’affichage passe en notation scientifique.
const LONGUEUR_AFFICHAGE: usize = 12;

/* ------------------------ Flottants ------------------------ */

/// Arrondi à PRECISION chiffres significatifs si BANDE_MIN < |x| < BANDE_MAX.
pub fn arrondi_16(x: f64) -> f64 {
    let a = x.abs();
    if !(a > BANDE_MIN && a < BANDE_MAX) {
        return x;
    }
    format!("{:.*e}", PRECISION - 1, x).parse().unwrap_or(x)
}

/// f64 -> texte court : décimal entre 1e-7 et 1e21, scientifique (e+N / e-N) ailleurs.
pub fn reel_vers_texte(x: f64) -> String {
    if x.is_nan() {
        return "NaN".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if x == 0.0 {
        return "0".into();
    }

    let a = x.abs();
    if (1e-7..1e21).contains(&a) {
        format!("{x}")
    } else {
        exposant_signe(&format!("{x:e}"))
    }
}

/// "1.5e21" -> "1.5e+21" (le signe de l’exposant est toujours écrit).
fn exposant_signe(s: &str) -> String {
    match s.split_once('e') {
        Some((m, e)) if !e.starts_with('-') => format!("{m}e+{e}"),
        _ => s.to_string(),
    }
}

/* ------------------------ Résultats ------------------------ */

/// Texte canonique d’un résultat (ce qui redevient l’entrée de la session).
pub fn texte_resultat(v: &Valeur) -> String {
    match v {
        Valeur::Entier(n) => n.to_string(),
        Valeur::Reel(x) => reel_vers_texte(arrondi_16(*x)),
    }
}

/// Rendu écran d’un texte de résultat.
/// - entier long     : d.ddddde+N (sans passer par f64 : pas d’∞ pour les BigInt)
/// - flottant long   : 5 décimales en exponentiel
/// - sinon           : milliers groupés par ','
pub fn format_affichage(d: &str) -> String {
    if d.contains("Error") {
        return d.to_string();
    }

    if d.len() > LONGUEUR_AFFICHAGE && !d.contains('e') {
        if !d.contains('.') {
            if let Some(s) = entier_scientifique(d) {
                return s;
            }
            return d.to_string();
        }
        return match d.parse::<f64>() {
            Ok(x) => exposant_signe(&format!("{x:.5e}")),
            Err(_) => d.to_string(),
        };
    }

    if d.contains('e') {
        return d.to_string();
    }

    match d.split_once('.') {
        Some((ent, frac)) => format!("{}.{frac}", groupe_milliers(ent)),
        None => groupe_milliers(d),
    }
}

fn separe_signe(d: &str) -> (&str, &str) {
    match d.strip_prefix('-') {
        Some(reste) => ("-", reste),
        None => ("", d),
    }
}

fn entier_scientifique(d: &str) -> Option<String> {
    let (signe, chiffres) = separe_signe(d);
    if chiffres.len() < 2 || !chiffres.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let exp = chiffres.len() - 1;
    let fin = chiffres.len().min(6);
    Some(format!(
        "{signe}{}.{}e+{exp}",
        &chiffres[..1],
        &chiffres[1..fin]
    ))
}

fn groupe_milliers(ent: &str) -> String {
    let (signe, chiffres) = separe_signe(ent);
    if chiffres.is_empty() || !chiffres.bytes().all(|b| b.is_ascii_digit()) {
        return ent.to_string();
    }

    let mut out = String::with_capacity(chiffres.len() + chiffres.len() / 3 + 1);
    out.push_str(signe);
    for (k, c) in chiffres.chars().enumerate() {
        if k > 0 && (chiffres.len() - k) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
