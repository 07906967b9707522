//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, dernière réponse,
//! démarche) et offrir des opérations simples (C/AC/±/DEL) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing) : le noyau reçoit un instantané de `entree`.
//! - Le registre `ans` n’est mis à jour qu’après un succès.
//! - Sur erreur : indicateur d’erreur + entrée remise à zéro.

use crate::noyau::{Decimal, Demarche};

/// Motifs retirés d’un bloc par DEL (sinon : un caractère).
const MOTIFS_BACKSPACE: &[&str] = &[
    "sin(", "cos(", "tan(", "sec(", "csc(", "cot(", "√[3](", "√(", "Ans",
];

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // dernier résultat affiché
    pub erreur: String,   // message d’erreur (si parsing/éval échoue)

    // --- registre "Ans" (lu par le noyau, écrit ici seulement) ---
    pub ans: Decimal,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: "0".to_string(),
            erreur: String::new(),
            ans: Decimal::zero(),
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

/// Glyphes d’affichage -> symboles du noyau (responsabilité de l’appelant).
pub fn normaliser_glyphes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            autre => autre,
        })
        .collect()
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultat + Ans).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.resultat = "0".to_string();
        self.erreur.clear();
        self.ans = Decimal::zero();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// C : effacer l’entrée et l’erreur (résultat et Ans conservés).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.focus_entree = true;
    }

    pub fn inserer(&mut self, texte: &str) {
        if !self.erreur.is_empty() {
            // nouvelle saisie après une erreur : on repart proprement
            self.erreur.clear();
        }
        self.entree.push_str(texte);
        self.focus_entree = true;
    }

    /// ± : change le signe de toute l’entrée.
    /// "" -> "-" ; "-(x)" -> "x" ; "x" -> "-(x)"
    pub fn basculer_signe(&mut self) {
        let brut = self.entree.trim();
        self.entree = if brut.is_empty() {
            "-".to_string()
        } else if brut == "-" {
            String::new()
        } else if let Some(interieur) = brut
            .strip_prefix("-(")
            .and_then(|r| r.strip_suffix(')'))
            .filter(|r| parentheses_equilibrees(r))
        {
            interieur.to_string()
        } else {
            format!("-({brut})")
        };
        self.focus_entree = true;
    }

    /// DEL : retire d’un coup les motifs utiles ("sin(", "Ans", etc.), sinon un caractère.
    pub fn backspace_entree(&mut self) {
        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        if let Some(motif) = MOTIFS_BACKSPACE.iter().find(|m| self.entree.ends_with(*m)) {
            let garde = self.entree.len() - motif.len();
            self.entree.truncate(garde);
        } else {
            self.entree.pop();
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// L’entrée est remise à zéro (l’utilisateur ressaisit) ; `ans` et le dernier
    /// résultat restent intacts.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.entree.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat (affichage + registre Ans + démarche).
    pub fn set_resultat(&mut self, valeur: Decimal, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = valeur.to_string();
        self.ans = valeur;
        self.demarche = demarche;
        self.focus_entree = true;
    }
}

/// "(1)+(2)" n’est pas un seul groupe : on ne retire "-(" … ")" que s’ils se répondent.
fn parentheses_equilibrees(s: &str) -> bool {
    let mut profondeur: i32 = 0;
    for c in s.chars() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur -= 1;
                if profondeur < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    profondeur == 0
}
