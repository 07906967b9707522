//! Noyau décimal
//!
//! Organisation interne :
//! - decimal.rs     : Decimal (mantisse big int + échelle), division à 50 chiffres
//! - erreur.rs      : ErreurNoyau (lexicale / syntaxe / évaluation / état illégal)
//! - jetons.rs      : tokenisation (moins unaire, multiplication implicite, √[n], Ans)
//! - rpn.rs         : shunting-yard -> postfix
//! - trig.rs        : sin/cos/tan/sec/csc/cot en degrés
//! - factorielle.rs : n! exact + Γ (Stirling)
//! - eval.rs        : pile postfixée + pipeline complet

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod factorielle;
pub mod jetons;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use decimal::Decimal;
pub use erreur::ErreurNoyau;
pub use eval::{evaluate, evaluate_avec_demarche, Demarche};
