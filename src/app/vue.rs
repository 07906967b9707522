// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus) ; Échap efface (app.rs)
// - Pavé : C ± % ÷ / 7 8 9 × / 4 5 6 - / 1 2 3 + / 0 . =
// - Fonctions : ( ) ^ ! √ √[3] Ans sin cos tan sec csc cot
//
// Les glyphes × et ÷ restent dans l’entrée ; ils sont normalisés juste avant le noyau.

use eframe::egui;
use tracing::{info, warn};

use super::etat::{normaliser_glyphes, AppCalc};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice décimale");
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_fonctions(ui);

                ui.add_space(8.0);

                self.ui_pave_numerique(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        // Résultat (ou erreur) au-dessus, aligné à droite comme un afficheur
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if self.erreur.is_empty() {
                ui.monospace(egui::RichText::new(&self.resultat).size(22.0));
            } else {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    egui::RichText::new(&self.erreur).monospace(),
                );
            }
        });

        ui.add_space(4.0);

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2(3+4), sin(30) + 2!, √[3](-8), Ans ÷ 2")
                .id_salt("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for (label, texte) in [
                ("(", "("),
                (")", ")"),
                ("^", "^"),
                ("!", "!"),
                ("√", "√("),
                ("∛", "√[3]("),
                ("Ans", "Ans"),
            ] {
                self.bouton_insert(ui, label, texte);
            }

            ui.separator();

            for nom in ["sin", "cos", "tan", "sec", "csc", "cot"] {
                self.bouton_insert(ui, nom, &format!("{nom}("));
            }
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "C", "Efface l’entrée", Action::ClearEntree);
                self.bouton_action(ui, "±", "Change le signe de l’entrée", Action::Signe);
                self.bouton_insert(ui, "%", "%");
                self.bouton_insert(ui, "÷", "÷");
                ui.end_row();

                self.bouton_insert(ui, "7", "7");
                self.bouton_insert(ui, "8", "8");
                self.bouton_insert(ui, "9", "9");
                self.bouton_insert(ui, "×", "×");
                ui.end_row();

                self.bouton_insert(ui, "4", "4");
                self.bouton_insert(ui, "5", "5");
                self.bouton_insert(ui, "6", "6");
                self.bouton_insert(ui, "-", "-");
                ui.end_row();

                self.bouton_insert(ui, "1", "1");
                self.bouton_insert(ui, "2", "2");
                self.bouton_insert(ui, "3", "3");
                self.bouton_insert(ui, "+", "+");
                ui.end_row();

                self.bouton_insert(ui, "0", "0");
                self.bouton_insert(ui, ".", ".");
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                self.bouton_action(ui, "=", "Évalue l’expression", Action::Evaluer);
                ui.end_row();

                self.bouton_action(
                    ui,
                    "AC",
                    "Remise à zéro totale (Ans compris)",
                    Action::ResetTotal,
                );
                ui.end_row();
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.postfix);
                Self::champ_demarche(ui, "Ans", "demarche_ans", &self.ans.to_string());
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 36.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::Signe => self.basculer_signe(),
                Action::Evaluer => self.eval_via_noyau(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        let resp = ui.add_sized([56.0, 36.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert);
        }
    }

    /// Évalue l’expression via le noyau, puis dépose résultat/erreur dans l’état UI.
    pub(crate) fn eval_via_noyau(&mut self) {
        let s = normaliser_glyphes(self.entree.trim());
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        info!(expression = %s, ans = %self.ans, "évaluation");
        match crate::noyau::evaluate_avec_demarche(&s, &self.ans) {
            Ok((valeur, demarche)) => {
                info!(resultat = %valeur, "résultat");
                self.set_resultat(valeur, demarche);
            }
            Err(e) => {
                warn!(expression = %s, detail = e.message(), "expression refusée");
                self.set_erreur(e.to_string());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
    Backspace,
    Signe,
    Evaluer,
}
