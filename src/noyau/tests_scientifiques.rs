//! Tests scientifiques (campagne) : propriétés du moteur + limites contrôlées.
//!
//! But : vérifier les invariants annoncés sans faire chauffer la machine.
//! - exactitude des entiers (sans division ni puissance)
//! - relecture des littéraux
//! - division par zéro toujours en erreur
//! - multiplication implicite aux seules adjacences prévues
//! - racines / factorielles aux bords du domaine
//! - budget temps global sur les cas lourds

use std::time::{Duration, Instant};

use num_bigint::BigInt;

use super::jetons::{format_tokens, tokenize, Tok};
use super::rpn::to_postfix;
use super::{evaluate, Decimal, ErreurNoyau};

fn eval_ok(expr: &str) -> Decimal {
    evaluate(expr, &Decimal::zero()).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_val(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr).to_string(), attendu, "expr={expr:?}");
}

fn assert_categorie(expr: &str, categorie: fn(&ErreurNoyau) -> bool) {
    match evaluate(expr, &Decimal::zero()) {
        Ok(v) => panic!("expr={expr:?} aurait dû échouer (valeur {v})"),
        Err(e) => assert!(categorie(&e), "expr={expr:?} mauvaise catégorie: {e:?}"),
    }
}

fn est_eval(e: &ErreurNoyau) -> bool {
    matches!(e, ErreurNoyau::Evaluation(_))
}

fn est_syntaxe(e: &ErreurNoyau) -> bool {
    matches!(e, ErreurNoyau::Syntaxe(_))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Exactitude entière ------------------------ */

#[test]
fn sci_entiers_exacts_contre_bigint() {
    // (a + b) * c - d avec des entiers qui débordent largement u64
    let a = "98765432109876543210";
    let b = "12345678901234567890";
    let c = "1000000007";
    let d = "42";
    let expr = format!("({a} + {b}) * {c} - {d}");

    let big = |s: &str| s.parse::<BigInt>().unwrap();
    let attendu = (big(a) + big(b)) * big(c) - big(d);

    assert_val(&expr, &attendu.to_string());
}

#[test]
fn sci_priorites_usuelles() {
    assert_val("2 + 3 * 4", "14");
    assert_val("2 * 3 + 4 * 5", "26");
    assert_val("100 - 10 * 3 % 7", "98");
    assert_val("(((7)))", "7");
}

/* ------------------------ Relecture des littéraux ------------------------ */

#[test]
fn sci_relecture_des_nombres() {
    for litteral in ["0", "3.14", "-2.5", ".125", "10.", "0.000001", "123456789.987654321"] {
        let jetons = tokenize(litteral, &Decimal::zero()).unwrap();
        let [Tok::Nombre(texte)] = jetons.as_slice() else {
            panic!("{litteral:?} devrait donner un seul nombre: {jetons:?}");
        };
        let valeur: Decimal = texte.parse().unwrap();
        assert_eq!(eval_ok(litteral), valeur, "{litteral:?}");
        assert_eq!(valeur.to_string().parse::<Decimal>().unwrap(), valeur);
    }
}

/* ------------------------ Division par zéro ------------------------ */

#[test]
fn sci_division_par_zero_toujours_erreur() {
    for expr in ["5 / 0", "5 % 0", "0 / 0", "1 / (3 - 3)", "2 % 0.0", "1 / sin(0)"] {
        assert_categorie(expr, est_eval);
    }
}

/* ------------------------ Multiplication implicite ------------------------ */

#[test]
fn sci_multiplication_implicite_exacte() {
    assert_val("2(3)", "6");
    assert_val("2 3", "6");
    assert_val("(1)(2)", "2");
    assert_val("2sin(30)", "1");
    assert_val("2 + 3", "5");
    assert_val("2 - 3", "-1");

    // pas de '*' devant une racine
    let jetons = tokenize("2√4", &Decimal::zero()).unwrap();
    assert_eq!(format_tokens(&jetons), "2 √ 4");
}

/* ------------------------ Fonctions liées à leur parenthèse ------------------------ */

#[test]
fn sci_postfix_fonction_et_factorielle() {
    let jetons = tokenize("sin(30) + 2!", &Decimal::zero()).unwrap();
    let post = to_postfix(&jetons).unwrap();
    assert_eq!(format_tokens(&post), "30 sin 2 ! +");
    assert_val("sin(30) + 2!", "2.5");
}

#[test]
fn sci_fonctions_imbriquees() {
    assert_val("cos(60 + sin(30) * 60)", "0");
    assert_val("sec(2 * (30))", "2");
}

/* ------------------------ Racines ------------------------ */

#[test]
fn sci_racines_bords() {
    assert_categorie("√[2](-4)", est_eval);
    assert_val("√[3](-8)", "-2");
    assert_val("√[5](-32)", "-2");
    assert_categorie("√[0](8)", est_eval);
    assert_val("√[1]7.5", "7.5");
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn sci_factorielle_exacte() {
    assert_val("5!", "120");
    assert_val("0!", "1");
    assert_val("20!", "2432902008176640000");
    assert_categorie("-1!", est_eval);
}

/* ------------------------ Parenthèses ------------------------ */

#[test]
fn sci_parentheses_non_appariees_partout() {
    for expr in ["(1 + 2", "1 + 2)", "(1 + (2)", "sin(30", "3!)", ")1("] {
        assert_categorie(expr, est_syntaxe);
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_grosse_factorielle() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let v = eval_ok("1000!");
    budget(t0, max);

    // 1000! a 2568 chiffres et se termine par 249 zéros
    let s = v.to_string();
    assert_eq!(s.len(), 2568);
    assert!(s.ends_with(&"0".repeat(249)));
}

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut expr = String::new();
    for k in 0..2000 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("0.1");
    }
    budget(t0, max);

    assert_val(&expr, "200");
    budget(t0, max);
}
