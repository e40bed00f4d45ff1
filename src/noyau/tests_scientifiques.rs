//! Tests scientifiques (campagne) : propriétés du pipeline + limites contrôlées.
//!
//! But : vérifier les contrats bout à bout sans faire chauffer la machine.
//! - budget temps par test
//! - tailles bornées (jetons, imbrication, factorielle)
//! - noyaux numériques : précision attendue + terminaison garantie

use std::time::{Duration, Instant};

use num_bigint::BigInt;

use super::erreur::{ErreurCalc, GenreErreur};
use super::eval::Evaluateur;
use super::jetons::{tokenize, Jeton};
use super::syntaxe::parse;
use super::{eval_expression, Bibliotheque, ModeAngle, Portee, Resultat, Valeur};

fn ev_dans(texte: &str, portee: &mut Portee, mode: ModeAngle) -> Resultat<Valeur> {
    eval_expression(&Bibliotheque::standard(), texte, portee, mode)
}

fn ev(texte: &str) -> Resultat<Valeur> {
    ev_dans(texte, &mut Portee::new(), ModeAngle::Radians)
}

fn ev_ok(texte: &str) -> Valeur {
    ev(texte).unwrap_or_else(|e| panic!("expr={texte:?} err={e}"))
}

fn reel(texte: &str) -> f64 {
    ev_ok(texte).en_reel()
}

fn genre(texte: &str) -> GenreErreur {
    match ev(texte) {
        Ok(v) => panic!("expr={texte:?} devait échouer, a donné {v}"),
        Err(e) => e.genre(),
    }
}

/// Traces visibles avec `cargo test -- --nocapture` (coupure de profondeur, erreurs).
fn traces() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Budget anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Jetons ------------------------ */

#[test]
fn sci_numeral_avec_exposant() {
    assert_eq!(
        tokenize("12.5e+3").unwrap(),
        vec![Jeton::Nombre("12.5e+3".into())]
    );
    assert_eq!(
        tokenize("12.5e").unwrap(),
        vec![Jeton::Nombre("12.5".into()), Jeton::Ident("e".into())]
    );
    assert_eq!(reel("12.5e+3"), 12500.0);
}

/* ------------------------ Grammaire ------------------------ */

#[test]
fn sci_priorites_et_associativite() {
    assert_eq!(ev_ok("2+3*4"), Valeur::entier(14));
    assert_eq!(ev_ok("2^3^2"), Valeur::entier(512));
    assert_eq!(ev_ok("(2^3)^2"), Valeur::entier(64));
    assert_eq!(ev_ok("-2^2"), Valeur::entier(-4));
    assert_eq!(ev_ok("10-4-3"), Valeur::entier(3));
}

#[test]
fn sci_multiplication_implicite() {
    let mut p = Portee::new();
    p.definir("x", Valeur::entier(5));
    assert_eq!(ev_dans("2x", &mut p, ModeAngle::Radians).unwrap(), Valeur::entier(10));
    assert_eq!(ev_dans("2(x+1)", &mut p, ModeAngle::Radians).unwrap(), Valeur::entier(12));
    assert_eq!(ev_dans("(x)(x)", &mut p, ModeAngle::Radians).unwrap(), Valeur::entier(25));
}

#[test]
fn sci_forme_commande_un_seul_facteur() {
    // "sin 90 + 1" = sin(90) + 1, pas sin(91)
    let mut p = Portee::new();
    let v = ev_dans("sin 90 + 1", &mut p, ModeAngle::Degres).unwrap().en_reel();
    assert!((v - 2.0).abs() < 1e-12, "v={v}");

    let w = ev_dans("sin(90 + 1)", &mut p, ModeAngle::Degres).unwrap().en_reel();
    assert!((w - 91f64.to_radians().sin()).abs() < 1e-12, "w={w}");
}

/* ------------------------ Promotion Entier / Reel ------------------------ */

#[test]
fn sci_promotion() {
    assert_eq!(ev_ok("3+2"), Valeur::entier(5));
    assert_eq!(ev_ok("3+2.0"), Valeur::Reel(5.0));
    assert_eq!(ev_ok("6/3"), Valeur::Reel(2.0));
    assert_eq!(ev_ok("2^-1"), Valeur::Reel(0.5));
    assert_eq!(ev_ok("7%3"), Valeur::entier(1));
    assert_eq!(ev_ok("-7%3"), Valeur::entier(-1));
}

#[test]
fn sci_entiers_non_bornes() {
    assert_eq!(ev_ok("2^200"), Valeur::Entier(BigInt::from(2).pow(200)));

    let a = "9".repeat(40);
    let attendu: BigInt = a.parse::<BigInt>().unwrap() * a.parse::<BigInt>().unwrap();
    assert_eq!(ev_ok(&format!("{a}*{a}")), Valeur::Entier(attendu));

    // (2^100 + 1) - 2^100 : exact, pas d’absorption flottante
    assert_eq!(ev_ok("(2^100+1)-2^100"), Valeur::entier(1));
}

/* ------------------------ Erreurs typées ------------------------ */

#[test]
fn sci_taxonomie_des_erreurs() {
    traces();
    assert_eq!(ev("5/0"), Err(ErreurCalc::DivisionParZero));
    assert_eq!(genre("5/0"), GenreErreur::Eval);
    assert_eq!(genre("5.5%0"), GenreErreur::Eval);
    assert_eq!(genre("fact(5001)"), GenreErreur::Plage);
    assert_eq!(genre("fact(-1)"), GenreErreur::Plage);
    assert_eq!(genre("2 # 3"), GenreErreur::Lex);
    assert_eq!(genre("(1+2"), GenreErreur::Syntaxe);
    assert_eq!(genre("1+"), GenreErreur::Syntaxe);
    assert_eq!(genre("1 2 )"), GenreErreur::Syntaxe);
    assert_eq!(genre("y+1"), GenreErreur::Eval);
    assert_eq!(genre("sqrt(-1)"), GenreErreur::PasUnNombre);
    assert_eq!(genre("ln(-1)*0"), GenreErreur::PasUnNombre);
}

#[test]
fn sci_factorielle_exacte() {
    assert_eq!(ev_ok("fact(5)"), Valeur::entier(120));
    assert_eq!(ev_ok("fact(0)"), Valeur::entier(1));
    assert!(ev_ok("fact(25)").est_entier());
}

/* ------------------------ Portée ------------------------ */

#[test]
fn sci_affectation_puis_lecture() {
    let mut p = Portee::new();
    assert_eq!(ev_dans("x=7", &mut p, ModeAngle::Degres).unwrap(), Valeur::entier(7));
    assert_eq!(ev_dans("x*2", &mut p, ModeAngle::Degres).unwrap(), Valeur::entier(14));
}

#[test]
fn sci_constantes_et_ombrage() {
    assert!((reel("PI") - std::f64::consts::PI).abs() < 1e-15);
    assert!((reel("e") - std::f64::consts::E).abs() < 1e-15);

    let mut p = Portee::new();
    ev_dans("e = 2", &mut p, ModeAngle::Radians).unwrap();
    assert_eq!(ev_dans("e*3", &mut p, ModeAngle::Radians).unwrap(), Valeur::entier(6));
}

/* ------------------------ Noyaux numériques ------------------------ */

#[test]
fn sci_integrale_et_derivee() {
    let i = reel("integral(x^2, 0, 1)");
    assert!((i - 1.0 / 3.0).abs() < 1e-6, "i={i}");

    let d = reel("deriv(x^2, 3)");
    assert!((d - 6.0).abs() < 1e-6, "d={d}");
}

#[test]
fn sci_noyaux_imbriques() {
    let t0 = Instant::now();

    // dérivée exacte pour un cubique, intégrale de 3x^2 sur [0, 1]
    let v = reel("integral(deriv(x^3, x), 0, 1)");
    assert!((v - 1.0).abs() < 1e-6, "v={v}");

    budget(t0, Duration::from_secs(2));
}

#[test]
fn sci_integrale_coupee_termine() {
    traces();
    let t0 = Instant::now();
    let v = reel("integral(1/sqrt(x), 1e-12, 1)");
    assert!(v.is_finite(), "v={v}");
    assert!(v > 1.0, "v={v}");
    budget(t0, Duration::from_secs(5));
}

#[test]
fn sci_noyau_ne_fuit_pas_x() {
    let mut p = Portee::new();
    p.definir("x", Valeur::entier(4));
    let v = ev_dans("deriv(x^2, 1) + x", &mut p, ModeAngle::Radians).unwrap().en_reel();
    assert!((v - 6.0).abs() < 1e-6, "v={v}");
    assert_eq!(p.get("x"), Some(&Valeur::entier(4)));
}

/* ------------------------ Déterminisme ------------------------ */

#[test]
fn sci_meme_arbre_meme_resultat() {
    let b = Bibliotheque::standard();
    let evaluateur = Evaluateur::new(&b, ModeAngle::Radians);

    for texte in [
        "2^64 + 3*7",
        "sin(1)/cos(2) + ln(3)",
        "integral(exp(x), 0, 2)",
        "deriv(sqrt(x), 4) * fact(12)",
    ] {
        let arbre = parse(&tokenize(texte).unwrap(), &b).unwrap();
        let mut p = Portee::new();
        p.definir("k", Valeur::Reel(0.25));

        let v1 = evaluateur.eval(&arbre, &mut p).unwrap();
        let v2 = evaluateur.eval(&arbre, &mut p).unwrap();
        assert_eq!(v1, v2, "expr={texte:?}");
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();

    // 250 termes = 499 jetons, sous la borne
    let expr = vec!["1"; 250].join("+");
    assert_eq!(ev_ok(&expr), Valeur::entier(250));

    budget(t0, Duration::from_millis(200));
}

#[test]
fn sci_stress_expression_trop_longue() {
    let expr = vec!["1"; 300].join("+");
    assert_eq!(genre(&expr), GenreErreur::Syntaxe);
}

#[test]
fn sci_stress_imbrication() {
    let t0 = Instant::now();

    let raisonnable = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    assert_eq!(ev_ok(&raisonnable), Valeur::entier(1));

    let profonde = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(genre(&profonde), GenreErreur::Syntaxe);

    let negations = format!("{}1", "-".repeat(300));
    assert_eq!(genre(&negations), GenreErreur::Syntaxe);

    budget(t0, Duration::from_millis(200));
}

#[test]
fn sci_stress_factorielle_plafond() {
    let t0 = Instant::now();

    match ev_ok("fact(5000)") {
        Valeur::Entier(n) => assert_eq!(n.to_string().len(), 16326),
        autre => panic!("attendu un entier, reçu {autre}"),
    }

    budget(t0, Duration::from_secs(2));
}

#[test]
fn sci_stress_puissance_geante_en_flottant() {
    let t0 = Instant::now();

    // exposant au-delà du chemin entier : bascule f64 (∞), pas de calcul BigInt géant
    let v = ev_ok("3^100000000");
    assert!(!v.est_entier());
    assert_eq!(v.en_reel(), f64::INFINITY);

    budget(t0, Duration::from_millis(200));
}
