// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix)
//
// Règles:
// - Nombre           : sortie directe
// - Op binaire       : dépile tant que le sommet est un opérateur (binaire, fonction, racine, !)
//                      de précédence >= ; égalité => associatif à gauche (y compris ^)
// - Fonction, Racine : empilées, elles attendent leur argument (terme suivant ou parenthèse)
// - neg (moins unaire) : préfixe empilé ; lie plus fort que * / % mais moins que ^
//                        (-(2)^2 = -4, 2/-(4) = -0.5, 2^-(3) = 0.125)
// - '!'              : postfixe, dépile les '!' déjà en pile (a!! = (a!)!)
// - ')'              : dépile jusqu’à '(' puis sort la fonction/racine collée, puis un '!' éventuel
//
// Précédences : ! = 5 > √ = fonction = 4 > ^ = 3 > neg > * / % = 2 > + - = 1
// (comparées en rangs doublés pour loger neg entre 2 et 3)

use super::erreur::ErreurNoyau;
use super::jetons::{Op, Tok};

const RANG_OPPOSE: u8 = 5;

fn rang_op(op: Op) -> u8 {
    2 * op.precedence()
}

fn rang(t: &Tok) -> Option<u8> {
    match t {
        Tok::Op(op) => Some(rang_op(*op)),
        Tok::Oppose => Some(RANG_OPPOSE),
        Tok::Fonction(_) | Tok::Racine(_) => Some(8),
        Tok::Factorielle => Some(10),
        Tok::Nombre(_) | Tok::LPar | Tok::RPar => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [sin, (, 30, ), +, 2, !]
///   rpn:    [30, sin, 2, !, +]
pub fn to_postfix(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Nombre(_) => out.push(tok),

            Tok::Op(op) => {
                let r = rang_op(op);
                while ops.last().and_then(rang).is_some_and(|r_top| r_top >= r) {
                    depiler_vers(&mut ops, &mut out);
                }
                ops.push(tok);
            }

            Tok::LPar | Tok::Fonction(_) | Tok::Racine(_) | Tok::Oppose => ops.push(tok),

            Tok::Factorielle => {
                while matches!(ops.last(), Some(Tok::Factorielle)) {
                    depiler_vers(&mut ops, &mut out);
                }
                ops.push(tok);
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => {
                            return Err(ErreurNoyau::syntaxe(
                                "parenthèses non appariées : ')' sans '('",
                            ))
                        }
                    }
                }

                // fonction (ou racine) collée à son argument parenthésé
                if matches!(ops.last(), Some(Tok::Fonction(_) | Tok::Racine(_))) {
                    depiler_vers(&mut ops, &mut out);
                }
                if matches!(ops.last(), Some(Tok::Factorielle)) {
                    depiler_vers(&mut ops, &mut out);
                }
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurNoyau::syntaxe(
                "parenthèses non appariées : '(' non fermée",
            ));
        }
        out.push(op);
    }

    Ok(out)
}

fn depiler_vers(ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    if let Some(top) = ops.pop() {
        out.push(top);
    }
}
