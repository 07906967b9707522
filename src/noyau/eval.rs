//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN (shunting-yard) -> pile de valeurs Decimal
//!
//! Sans état : chaque appel crée ses jetons, sa forme postfixée et sa pile,
//! et ne lit que la dernière réponse (`ans`) fournie par l’appelant.

use tracing::debug;

use super::decimal::Decimal;
use super::erreur::ErreurNoyau;
use super::factorielle::factorielle;
use super::jetons::{format_tokens, tokenize, Op, Tok};
use super::rpn::to_postfix;
use super::trig;

/// Au-delà, √[n] passe par le chemin flottant (racine big int trop coûteuse).
pub const INDICE_RACINE_MAX: u32 = 64;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub postfix: String,
}

/// API publique : évalue une expression (glyphes × ÷ déjà normalisés par l’appelant).
pub fn evaluate(expression: &str, ans: &Decimal) -> Result<Decimal, ErreurNoyau> {
    evaluate_avec_demarche(expression, ans).map(|(valeur, _)| valeur)
}

/// Comme `evaluate`, avec la démarche (jetons + RPN) pour l’affichage.
pub fn evaluate_avec_demarche(
    expression: &str,
    ans: &Decimal,
) -> Result<(Decimal, Demarche), ErreurNoyau> {
    // 1) Jetons
    let jetons = tokenize(expression, ans)?;
    let jetons_txt = format_tokens(&jetons);
    debug!(jetons = %jetons_txt, "jetons");

    // 2) RPN
    let postfix = to_postfix(&jetons)?;
    let postfix_txt = format_tokens(&postfix);
    debug!(rpn = %postfix_txt, "forme postfixée");

    // 3) Pile
    let valeur = eval_postfix(&postfix)?;
    debug!(valeur = %valeur, "valeur");

    Ok((
        valeur,
        Demarche {
            jetons: jetons_txt,
            postfix: postfix_txt,
        },
    ))
}

/// Évalue une forme postfixée avec une seule pile de valeurs.
pub fn eval_postfix(postfix: &[Tok]) -> Result<Decimal, ErreurNoyau> {
    let mut pile: Vec<Decimal> = Vec::with_capacity(postfix.len());

    for tok in postfix {
        match tok {
            Tok::Nombre(texte) => pile.push(texte.parse()?),

            Tok::Op(op) => {
                // premier dépilé = opérande de droite
                let b = depiler(&mut pile)?;
                let a = depiler(&mut pile)?;
                pile.push(appliquer_op(*op, &a, &b)?);
            }

            Tok::Fonction(f) => {
                let x = depiler(&mut pile)?;
                pile.push(trig::appliquer(f, &x)?);
            }

            Tok::Racine(indice) => {
                let x = depiler(&mut pile)?;
                pile.push(racine(indice.as_deref(), &x)?);
            }

            Tok::Factorielle => {
                let x = depiler(&mut pile)?;
                pile.push(factorielle(&x)?);
            }

            Tok::Oppose => {
                let x = depiler(&mut pile)?;
                pile.push(-x);
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurNoyau::etat_illegal("parenthèse dans la forme postfixée"))
            }
        }
    }

    if pile.len() != 1 {
        return Err(ErreurNoyau::etat_illegal(format!(
            "la pile ne se réduit pas à une seule valeur ({} valeurs)",
            pile.len()
        )));
    }
    pile.pop()
        .map(Decimal::normaliser)
        .ok_or_else(|| ErreurNoyau::etat_illegal("pile vide"))
}

fn depiler(pile: &mut Vec<Decimal>) -> Result<Decimal, ErreurNoyau> {
    pile.pop()
        .ok_or_else(|| ErreurNoyau::evaluation("pile malformée : opérande manquant"))
}

fn appliquer_op(op: Op, a: &Decimal, b: &Decimal) -> Result<Decimal, ErreurNoyau> {
    match op {
        Op::Plus => Ok(a + b),
        Op::Moins => Ok(a - b),
        Op::Fois => Ok(a * b),
        Op::Div => a.diviser(b),
        Op::Modulo => a.reste(b),
        Op::Puissance => puissance_flottante(a, b),
    }
}

/// a^b en f64 : chemin volontairement approché (pas de puissance décimale exacte
/// pour un exposant quelconque). Résultat relu en décimal puis normalisé.
fn puissance_flottante(a: &Decimal, b: &Decimal) -> Result<Decimal, ErreurNoyau> {
    Decimal::from_f64(a.to_f64().powf(b.to_f64()))
}

/// √x (indice None) ou √[n]x.
fn racine(indice: Option<&str>, x: &Decimal) -> Result<Decimal, ErreurNoyau> {
    let Some(indice) = indice else {
        if x.is_negative() {
            return Err(ErreurNoyau::evaluation("racine carrée d’un nombre négatif"));
        }
        return Ok(x.racine_nieme(2));
    };

    let n: Decimal = indice.parse()?;
    if n.is_zero() {
        return Err(ErreurNoyau::evaluation("indice de racine nul"));
    }
    if x.is_negative() && !n.est_impair() {
        return Err(ErreurNoyau::evaluation(
            "racine d’indice pair ou non entier d’un nombre négatif",
        ));
    }

    // indice entier raisonnable : racine big int (exacte si puissance parfaite)
    if let Some(k) = n.to_i64().filter(|k| k.unsigned_abs() <= u64::from(INDICE_RACINE_MAX)) {
        let r = x.racine_nieme(k.unsigned_abs() as u32);
        return if k > 0 { Ok(r) } else { Decimal::un().diviser(&r) };
    }

    // sinon : x^(1/n) en flottant, signe reporté (n impair)
    let inverse = Decimal::un().diviser(&n)?;
    let module = puissance_flottante(&x.abs(), &inverse)?;
    Ok(if x.is_negative() { -module } else { module })
}
