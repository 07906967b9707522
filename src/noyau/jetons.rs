// src/noyau/jetons.rs

use tracing::trace;

use super::decimal::Decimal;
use super::erreur::ErreurNoyau;

/// Opérateurs binaires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Div,
    Modulo,
    Puissance,
}

impl Op {
    fn depuis_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Moins),
            '*' => Some(Op::Fois),
            '/' => Some(Op::Div),
            '%' => Some(Op::Modulo),
            '^' => Some(Op::Puissance),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '*',
            Op::Div => '/',
            Op::Modulo => '%',
            Op::Puissance => '^',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Moins => 1,
            Op::Fois | Op::Div | Op::Modulo => 2,
            Op::Puissance => 3,
        }
    }
}

/// Fonctions unaires (argument en degrés).
/// Un nom absent de la table reste `Inconnue` : l’évaluation le refusera.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Inconnue(String),
}

/// Table (immuable) des noms reconnus.
const TABLE_FONCTIONS: &[(&str, Fonction)] = &[
    ("sin", Fonction::Sin),
    ("cos", Fonction::Cos),
    ("tan", Fonction::Tan),
    ("sec", Fonction::Sec),
    ("csc", Fonction::Csc),
    ("cot", Fonction::Cot),
];

/// Identifiant réservé : dernière réponse.
const IDENT_ANS: &str = "ans";

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Fonction {
        TABLE_FONCTIONS
            .iter()
            .find(|(n, _)| *n == nom)
            .map(|(_, f)| f.clone())
            .unwrap_or_else(|| Fonction::Inconnue(nom.to_string()))
    }

    pub fn nom(&self) -> &str {
        match self {
            Fonction::Inconnue(nom) => nom,
            connue => TABLE_FONCTIONS
                .iter()
                .find(|(_, f)| f == connue)
                .map(|(n, _)| *n)
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Texte du littéral (toujours relisible par `Decimal::from_str`).
    Nombre(String),
    Op(Op),
    Fonction(Fonction),
    Factorielle,
    LPar,
    RPar,
    /// `None` = racine carrée ; `Some(indice)` = √[indice].
    Racine(Option<String>),
    /// Moins unaire devant autre chose qu’un littéral : -(…), -√…, -sin…
    Oppose,
}

impl Tok {
    /// Lexème tel qu’on l’écrirait.
    pub fn texte(&self) -> String {
        match self {
            Tok::Nombre(t) => t.clone(),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::Fonction(f) => f.nom().to_string(),
            Tok::Factorielle => "!".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Racine(None) => "√".to_string(),
            Tok::Racine(Some(indice)) => format!("√[{indice}]"),
            Tok::Oppose => "neg".to_string(),
        }
    }
}

/// Tokenize une chaîne en jetons (balayage unique, sans retour arrière).
/// Supporte:
/// - nombres décimaux (ex: 12, 3.14, .5)
/// - moins unaire replié dans le littéral qui suit (début, après opérateur, après '(') ;
///   devant autre chose qu’un nombre, jeton préfixe `Oppose`
/// - opérateurs + - * / % ^
/// - parenthèses ( ), factorielle !
/// - √ et √[n] (indice entre crochets)
/// - identifiants [a-zA-Z]+ (normalisés en minuscules) ; `Ans` = dernière réponse
/// - multiplication implicite : 2(3), 2 3, (1)(2), 2sin(30), 2!3
pub fn tokenize(s: &str, ans: &Decimal) -> Result<Vec<Tok>, ErreurNoyau> {
    let chars: Vec<char> = s.chars().collect();
    let mut out: Vec<Tok> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre
        if debute_nombre(c) {
            let (texte, suite) = lire_nombre(&chars, i)?;
            pousser(&mut out, Tok::Nombre(texte));
            i = suite;
            continue;
        }

        // Moins unaire
        if c == '-' && moins_unaire(out.last()) {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && debute_nombre(chars[j]) {
                let (texte, suite) = lire_nombre(&chars, j)?;
                pousser(&mut out, Tok::Nombre(format!("-{texte}")));
                i = suite;
            } else {
                // -(…), -√…, -sin… : négation du seul terme qui suit
                pousser(&mut out, Tok::Oppose);
                i += 1;
            }
            continue;
        }

        // Opérateurs binaires
        if let Some(op) = Op::depuis_char(c) {
            pousser(&mut out, Tok::Op(op));
            i += 1;
            continue;
        }

        match c {
            '(' => {
                pousser(&mut out, Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                pousser(&mut out, Tok::RPar);
                i += 1;
                continue;
            }
            '!' => {
                pousser(&mut out, Tok::Factorielle);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Racine : √ ou √[n]
        if c == '√' {
            i += 1;
            if i < chars.len() && chars[i] == '[' {
                let (indice, suite) = lire_indice_racine(&chars, i + 1)?;
                pousser(&mut out, Tok::Racine(Some(indice)));
                i = suite;
            } else {
                pousser(&mut out, Tok::Racine(None));
            }
            continue;
        }

        // Identifiants ASCII : [a-zA-Z]+
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if w == IDENT_ANS {
                pousser(&mut out, Tok::Nombre(ans.to_string()));
            } else {
                pousser(&mut out, Tok::Fonction(Fonction::depuis_nom(&w)));
            }
            continue;
        }

        return Err(ErreurNoyau::lexicale(format!("caractère inattendu : '{c}'")));
    }

    trace!(entree = s, jetons = out.len(), "tokenize");
    Ok(out)
}

fn debute_nombre(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// '-' unaire : début de flux, après un opérateur (ou une négation), après '('.
fn moins_unaire(precedent: Option<&Tok>) -> bool {
    matches!(
        precedent,
        None | Some(Tok::Op(_)) | Some(Tok::LPar) | Some(Tok::Oppose)
    )
}

/// Ajoute un jeton, précédé d’un '*' implicite si :
/// précédent ∈ {Nombre, ')', '!'} et nouveau ∈ {'(', Nombre, Fonction}.
fn pousser(out: &mut Vec<Tok>, tok: Tok) {
    let apres_valeur = matches!(
        out.last(),
        Some(Tok::Nombre(_)) | Some(Tok::RPar) | Some(Tok::Factorielle)
    );
    let ouvre_valeur = matches!(tok, Tok::LPar | Tok::Nombre(_) | Tok::Fonction(_));
    if apres_valeur && ouvre_valeur {
        out.push(Tok::Op(Op::Fois));
    }
    out.push(tok);
}

/// Suite maximale de chiffres / '.', validée comme littéral décimal.
fn lire_nombre(chars: &[char], debut: usize) -> Result<(String, usize), ErreurNoyau> {
    let mut fin = debut;
    while fin < chars.len() && debute_nombre(chars[fin]) {
        fin += 1;
    }
    let texte: String = chars[debut..fin].iter().collect();
    texte.parse::<Decimal>()?;
    Ok((texte, fin))
}

/// Lit l’indice de √[...] à partir du caractère qui suit '['.
/// Retourne (indice, position après ']').
fn lire_indice_racine(chars: &[char], debut: usize) -> Result<(String, usize), ErreurNoyau> {
    let mut fin = debut;
    while fin < chars.len() && chars[fin] != ']' {
        let c = chars[fin];
        if !(debute_nombre(c) || c == '-') {
            return Err(ErreurNoyau::lexicale(format!(
                "indice de racine invalide : '{c}'"
            )));
        }
        fin += 1;
    }
    if fin >= chars.len() {
        return Err(ErreurNoyau::lexicale("']' manquant après √["));
    }

    let indice: String = chars[debut..fin].iter().collect();
    indice
        .parse::<Decimal>()
        .map_err(|_| ErreurNoyau::lexicale(format!("indice de racine invalide : '{indice}'")))?;
    Ok((indice, fin + 1))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::texte)
        .collect::<Vec<_>>()
        .join(" ")
}
