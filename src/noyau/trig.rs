// src/noyau/trig.rs
//
// Trigonométrie en degrés
// -----------------------
// - Réduction exacte modulo 360 (Decimal), puis radians en f64
// - sin/cos arrondis à DECIMALES_TRIG chiffres : sin(30) = 0.5, cos(90) = 0
// - tan/sec/csc/cot dérivés de ces valeurs arrondies par division décimale :
//   les pôles (tan(90), sec(90), csc(0), cot(0)) tombent en "division par zéro"

use super::decimal::Decimal;
use super::erreur::ErreurNoyau;
use super::jetons::Fonction;

/// Chiffres conservés après sin/cos (au-delà : bruit binaire du f64).
pub const DECIMALES_TRIG: u32 = 15;

pub fn appliquer(f: &Fonction, degres: &Decimal) -> Result<Decimal, ErreurNoyau> {
    match f {
        Fonction::Sin => sinus(degres),
        Fonction::Cos => cosinus(degres),
        Fonction::Tan => sinus(degres)?.diviser(&cosinus(degres)?),
        Fonction::Sec => Decimal::un().diviser(&cosinus(degres)?),
        Fonction::Csc => Decimal::un().diviser(&sinus(degres)?),
        Fonction::Cot => cosinus(degres)?.diviser(&sinus(degres)?),
        Fonction::Inconnue(nom) => Err(ErreurNoyau::evaluation(format!(
            "fonction inconnue : {nom}"
        ))),
    }
}

fn radians(degres: &Decimal) -> Result<f64, ErreurNoyau> {
    let reduit = degres.reste(&Decimal::from(360))?;
    Ok(reduit.to_f64().to_radians())
}

fn sinus(degres: &Decimal) -> Result<Decimal, ErreurNoyau> {
    Ok(Decimal::from_f64(radians(degres)?.sin())?.arrondir(DECIMALES_TRIG))
}

fn cosinus(degres: &Decimal) -> Result<Decimal, ErreurNoyau> {
    Ok(Decimal::from_f64(radians(degres)?.cos())?.arrondir(DECIMALES_TRIG))
}
