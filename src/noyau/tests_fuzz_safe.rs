//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : seules les erreurs de domaine sont acceptées
//! - texte arbitraire : jamais de panique, toujours une erreur typée ou une valeur

use std::time::{Duration, Instant};

use super::{evaluate, Decimal, ErreurNoyau};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (utile pour tester les divisions par zéro)
    let entier = rng.pick(10);
    if rng.coin() {
        format!("{entier}.{}", rng.pick(100))
    } else {
        format!("{entier}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => format!("sin({})", gen_nombre(rng)),
        4 => format!("√({})", gen_nombre(rng)),
        _ => format!("{}!", rng.pick(8)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}%{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("{}({})", gen_atom(rng), gen_expr(rng, depth - 1)), // implicite
        7 => format!("cos({})", gen_expr(rng, depth - 1)),
        8 => format!("({}/-({}))", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        _ => {
            // diviseur nul garanti : a / (b - b)
            let b = gen_nombre(rng);
            format!("({}/({b}-{b}))", gen_expr(rng, depth - 1))
        }
    }
}

fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '7', '.', '+', '-', '*', '/', '%', '^', '(', ')', '!', '√', '[', ']', 's',
        'i', 'n', 'A', ' ', '#',
    ];
    let longueur = 1 + rng.pick(16) as usize;
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn est_erreur_de_domaine(e: &ErreurNoyau) -> bool {
    matches!(e, ErreurNoyau::Evaluation(_))
}

fn memes_resultats(a: &str, b: &str, ans: &Decimal) {
    match (evaluate(a, ans), evaluate(b, ans)) {
        (Ok(x), Ok(y)) => assert_eq!(x, y, "{a:?} vs {b:?}"),
        (Err(e), Err(f)) => assert_eq!(e, f, "{a:?} vs {b:?}"),
        (x, y) => panic!("{a:?} => {x:?} mais {b:?} => {y:?}"),
    }
}

/* ------------------------ Helper somme balancée ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match evaluate(&expr, &Decimal::zero()) {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(
                    est_erreur_de_domaine(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut rng_a = Rng::new(0xBADC0DE_u64);
    let mut rng_b = Rng::new(0xBADC0DE_u64);
    let ans: Decimal = "-3.5".parse().unwrap();

    for _ in 0..60 {
        let a = gen_expr(&mut rng_a, 3);
        let b = gen_expr(&mut rng_b, 3);
        assert_eq!(a, b);
        assert_eq!(evaluate(&a, &ans), evaluate(&b, &ans), "expr={a:?}");
    }
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng = Rng::new(0x5EED_u64);
    let ans = Decimal::from(7);

    for _ in 0..400 {
        budget(t0, max);
        let texte = gen_bruit(&mut rng);
        // erreur typée ou valeur : les deux conviennent, la panique non
        let _ = evaluate(&texte, &ans);
    }
}

#[test]
fn fuzz_safe_moins_unaire_lie_au_terme_suivant() {
    // a op -(b) doit valoir a op (0-(b)), quel que soit le serrage de op
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xFEED_u64);
    let zero = Decimal::zero();

    for _ in 0..120 {
        budget(t0, max);

        let a = gen_expr(&mut rng, 2);
        let b = gen_expr(&mut rng, 2);
        for op in ['+', '-', '*', '/', '%', '^'] {
            memes_resultats(&format!("({a}){op}-({b})"), &format!("({a}){op}(0-({b}))"), &zero);
        }
        memes_resultats(&format!("-({b})"), &format!("(0-({b}))"), &zero);
    }
}

#[test]
fn fuzz_safe_somme_balancee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = evaluate(&expr, &Decimal::zero()).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(0.5) = 400
    assert_eq!(v.to_string(), "400");
}
