// src/noyau/decimal.rs
//
// Décimal à précision arbitraire : valeur = mantisse / 10^echelle.
// - + - * % : exacts
// - / : quotient rationnel exact, puis arrondi à ECHELLE_DIVISION chiffres (demi vers le haut)
// - racines n-ièmes entières : racine big int de la mantisse décalée (exacte si puissance parfaite)
// - passerelle f64 (puissance, trigo, Γ) : via le texte décimal le plus court du flottant

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::ErreurNoyau;

/// Chiffres après la virgule pour `/` (et les racines non exactes).
pub const ECHELLE_DIVISION: u32 = 50;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

#[derive(Clone, Debug)]
pub struct Decimal {
    mantisse: BigInt,
    echelle: u32,
}

impl Decimal {
    pub fn new(mantisse: BigInt, echelle: u32) -> Self {
        Self { mantisse, echelle }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn un() -> Self {
        Self::new(BigInt::one(), 0)
    }

    pub fn is_zero(&self) -> bool {
        self.mantisse.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantisse.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self::new(self.mantisse.abs(), self.echelle)
    }

    /// Retire les zéros non significatifs de la partie fractionnaire.
    pub fn normaliser(mut self) -> Self {
        if self.mantisse.is_zero() {
            self.echelle = 0;
            return self;
        }
        let dix = BigInt::from(10);
        while self.echelle > 0 && (&self.mantisse % &dix).is_zero() {
            self.mantisse /= &dix;
            self.echelle -= 1;
        }
        self
    }

    /// Partie entière si la valeur est un entier exact.
    pub fn entier(&self) -> Option<BigInt> {
        let facteur = pow10(self.echelle);
        if (&self.mantisse % &facteur).is_zero() {
            Some(&self.mantisse / facteur)
        } else {
            None
        }
    }

    pub fn est_entier(&self) -> bool {
        self.entier().is_some()
    }

    pub fn est_impair(&self) -> bool {
        self.entier()
            .is_some_and(|n| !(n % BigInt::from(2)).is_zero())
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.entier().and_then(|n| n.to_u32())
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.entier().and_then(|n| n.to_i64())
    }

    /// Approximation flottante (NaN si le texte décimal ne se relit pas).
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Relit un flottant via son écriture décimale la plus courte.
    ///
    /// Au plus 17 chiffres significatifs ; pour un grand flottant, les zéros
    /// qui suivent sont positionnels et ne portent aucune précision.
    pub fn from_f64(x: f64) -> Result<Self, ErreurNoyau> {
        if !x.is_finite() {
            return Err(ErreurNoyau::evaluation("résultat non fini"));
        }
        format!("{x}").parse::<Decimal>().map(Decimal::normaliser)
    }

    /// a / b à ECHELLE_DIVISION chiffres, arrondi demi vers le haut.
    pub fn diviser(&self, diviseur: &Decimal) -> Result<Self, ErreurNoyau> {
        if diviseur.is_zero() {
            return Err(ErreurNoyau::division_par_zero());
        }
        let quotient = BigRational::new(
            &self.mantisse * pow10(diviseur.echelle),
            &diviseur.mantisse * pow10(self.echelle),
        );
        Ok(arrondir_rationnel(&quotient, ECHELLE_DIVISION))
    }

    /// Reste de la division tronquée (signe du dividende).
    pub fn reste(&self, diviseur: &Decimal) -> Result<Self, ErreurNoyau> {
        if diviseur.is_zero() {
            return Err(ErreurNoyau::division_par_zero());
        }
        let (a, b, echelle) = aligner(self, diviseur);
        Ok(Decimal::new(a % b, echelle).normaliser())
    }

    /// Arrondi demi vers le haut à `decimales` chiffres après la virgule.
    pub fn arrondir(&self, decimales: u32) -> Self {
        if self.echelle <= decimales {
            return self.clone().normaliser();
        }
        let r = BigRational::new(self.mantisse.clone(), pow10(self.echelle));
        arrondir_rationnel(&r, decimales)
    }

    /// Racine n-ième (n >= 1), tronquée à au moins ECHELLE_DIVISION chiffres.
    /// Radicande négatif : -racine(|x|) (l’appelant garantit n impair).
    pub fn racine_nieme(&self, n: u32) -> Self {
        if self.is_negative() {
            return -self.abs().racine_nieme(n);
        }
        let n = n.max(1);
        // n*s >= echelle, pour rester entier
        let s = ECHELLE_DIVISION.max(self.echelle.div_ceil(n));
        let radicande = &self.mantisse * pow10(n * s - self.echelle);
        Decimal::new(radicande.nth_root(n), s).normaliser()
    }
}

fn aligner(a: &Decimal, b: &Decimal) -> (BigInt, BigInt, u32) {
    let e = a.echelle.max(b.echelle);
    (
        &a.mantisse * pow10(e - a.echelle),
        &b.mantisse * pow10(e - b.echelle),
        e,
    )
}

fn arrondir_rationnel(r: &BigRational, decimales: u32) -> Decimal {
    let facteur = BigRational::from_integer(pow10(decimales));
    // Ratio::round : demi -> loin de zéro
    let n = (r * &facteur).round().to_integer();
    Decimal::new(n, decimales).normaliser()
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::new(BigInt::from(n), 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Self {
        Self::new(n, 0)
    }
}

/* ------------------------ Comparaison (indépendante de l’échelle) ------------------------ */

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = aligner(self, other);
        a.cmp(&b)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

/* ------------------------ Opérateurs exacts ------------------------ */

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        let (a, b, e) = aligner(self, rhs);
        Decimal::new(a + b, e).normaliser()
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        let (a, b, e) = aligner(self, rhs);
        Decimal::new(a - b, e).normaliser()
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::new(&self.mantisse * &rhs.mantisse, self.echelle + rhs.echelle).normaliser()
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.mantisse, self.echelle)
    }
}

/* ------------------------ Texte <-> Décimal ------------------------ */

/// Littéral : '-' optionnel, chiffres, au plus un '.', au moins un chiffre.
impl FromStr for Decimal {
    type Err = ErreurNoyau;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalide = || ErreurNoyau::lexicale(format!("nombre invalide : '{s}'"));

        let (negatif, corps) = match s.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, s),
        };

        let mut chiffres = String::with_capacity(corps.len());
        let mut point_vu = false;
        let mut echelle: u32 = 0;

        for c in corps.chars() {
            match c {
                '0'..='9' => {
                    chiffres.push(c);
                    if point_vu {
                        echelle += 1;
                    }
                }
                '.' if !point_vu => point_vu = true,
                _ => return Err(invalide()),
            }
        }

        if chiffres.is_empty() {
            return Err(invalide());
        }

        let mut mantisse = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
        if negatif {
            mantisse = -mantisse;
        }
        Ok(Decimal::new(mantisse, echelle))
    }
}

/// Écriture décimale simple, sans zéros de fin ni notation scientifique.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.clone().normaliser();
        let signe = if d.is_negative() { "-" } else { "" };
        let chiffres = d.mantisse.abs().to_string();
        let e = d.echelle as usize;

        if e == 0 {
            return write!(f, "{signe}{chiffres}");
        }

        let chiffres = if chiffres.len() <= e {
            format!("{}{chiffres}", "0".repeat(e + 1 - chiffres.len()))
        } else {
            chiffres
        };
        let (entiere, fraction) = chiffres.split_at(chiffres.len() - e);
        write!(f, "{signe}{entiere}.{fraction}")
    }
}
