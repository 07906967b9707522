// src/noyau/factorielle.rs
//
// n! :
// - entier n >= 0 : produit exact 1·2·…·n (itératif, big int), borné par FACTORIELLE_MAX
// - non entier    : Γ(n+1) par la série de Stirling sur ln Γ (approximation)
//
// Borne d’erreur (Stirling) : on décale z jusqu’à z >= DECALAGE_MIN = 8 puis on tronque
// la série après le terme en z^-7. Le premier terme omis vaut 1/(1188·z^9) <= 6.3e-12.
// L’erreur relative sur Γ = exp(ln Γ) est l’erreur ABSOLUE sur ln Γ : elle reste sous
// 1e-10 (arrondis f64 compris) tant que Γ tient dans un f64 (n < ~170).
//
// Le résultat non entier passe par un f64 : au plus 17 chiffres significatifs, les
// zéros qui suivent (ex. 170.5! ~ 9.5e307, 308 chiffres) ne sont que positionnels.

use std::f64::consts::PI;

use num_bigint::BigInt;
use num_traits::One;

use super::decimal::Decimal;
use super::erreur::ErreurNoyau;

/// Plus grand entier accepté par `!` (au-delà, le produit gèle l’UI).
pub const FACTORIELLE_MAX: u32 = 10_000;

const DECALAGE_MIN: f64 = 8.0;

pub fn factorielle(x: &Decimal) -> Result<Decimal, ErreurNoyau> {
    if x.is_negative() {
        return Err(ErreurNoyau::evaluation("factorielle d’un nombre négatif"));
    }

    if x.est_entier() {
        let n = x
            .to_u32()
            .filter(|n| *n <= FACTORIELLE_MAX)
            .ok_or_else(|| ErreurNoyau::evaluation("factorielle trop grande"))?;
        return Ok(Decimal::from(produit(n)));
    }

    let gamma = ln_gamma(x.to_f64() + 1.0).exp();
    Decimal::from_f64(gamma)
}

fn produit(n: u32) -> BigInt {
    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= k;
    }
    acc
}

/// ln Γ(z), z > 0 : récurrence Γ(z) = Γ(z+1)/z jusqu’à z >= DECALAGE_MIN,
/// puis développement de Stirling.
fn ln_gamma(z: f64) -> f64 {
    let mut z = z;
    let mut decalage = 0.0;
    while z < DECALAGE_MIN {
        decalage += z.ln();
        z += 1.0;
    }

    let inv = 1.0 / z;
    let inv2 = inv * inv;
    let serie = inv * (1.0 / 12.0 - inv2 * (1.0 / 360.0 - inv2 * (1.0 / 1260.0 - inv2 / 1680.0)));

    (z - 0.5) * z.ln() - z + 0.5 * (2.0 * PI).ln() + serie - decalage
}
