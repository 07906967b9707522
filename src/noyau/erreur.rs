// src/noyau/erreur.rs
//
// Erreurs du noyau : une variante par étage du pipeline.
// - Lexicale   : jetons (caractère inconnu, nombre ou √[...] mal formé)
// - Syntaxe    : parenthèses non appariées
// - Evaluation : domaine (division par zéro, racine, factorielle, fonction inconnue)
// - EtatIllegal: la forme postfixée ne se réduit pas à une seule valeur

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurNoyau {
    #[error("erreur lexicale : {0}")]
    Lexicale(String),

    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("erreur de calcul : {0}")]
    Evaluation(String),

    #[error("état illégal : {0}")]
    EtatIllegal(String),
}

impl ErreurNoyau {
    pub fn lexicale(msg: impl Into<String>) -> Self {
        Self::Lexicale(msg.into())
    }

    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn etat_illegal(msg: impl Into<String>) -> Self {
        Self::EtatIllegal(msg.into())
    }

    pub fn division_par_zero() -> Self {
        Self::evaluation("division par zéro")
    }

    /// Message brut (sans le préfixe de catégorie).
    pub fn message(&self) -> &str {
        match self {
            Self::Lexicale(m) | Self::Syntaxe(m) | Self::Evaluation(m) | Self::EtatIllegal(m) => m,
        }
    }
}
