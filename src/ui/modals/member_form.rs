use egui::{self, RichText};

use crate::db::Database;
use crate::models::{
    health_catalog::{suggested_medications, COMMON_ALLERGIES, COMMON_CONDITIONS},
    FamilyMember, HealthStatus, RelationshipType,
};
use crate::ui::{
    state::{AppState, MemberFormData},
    theme::{Colors, Icons},
};

/// Formulär för att lägga till eller redigera en familjemedlem
pub struct MemberFormModal {
    form_data: MemberFormData,
    error_message: Option<String>,
    /// Vilken medlem formuläret laddats för (None = nytt formulär laddat)
    loaded_for: Option<Option<i64>>,
    /// Alla medlemmar, för val av ankare/förälder
    candidates: Vec<FamilyMember>,
}

impl MemberFormModal {
    pub fn new() -> Self {
        Self {
            form_data: MemberFormData::default(),
            error_message: None,
            loaded_for: None,
            candidates: Vec::new(),
        }
    }

    /// Visar modalen och returnerar true om den ska stängas
    pub fn show(&mut self, ctx: &egui::Context, state: &mut AppState, db: &Database) -> bool {
        let mut should_close = false;

        if self.loaded_for != Some(state.editing_member_id) {
            self.load(state, db);
        }

        let editing = state.editing_member_id.is_some();
        let title = if editing { "Redigera medlem" } else { "Ny familjemedlem" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(460.0);

                egui::ScrollArea::vertical().max_height(520.0).show(ui, |ui| {
                    egui::Grid::new("member_form_grid")
                        .num_columns(2)
                        .spacing([8.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Namn:");
                            ui.text_edit_singleline(&mut self.form_data.name);
                            ui.end_row();

                            if editing {
                                ui.label("Födelsedatum:");
                                ui.horizontal(|ui| {
                                    ui.add(egui::TextEdit::singleline(&mut self.form_data.birth_date).desired_width(100.0));
                                    ui.label(RichText::new("YYYY-MM-DD").small().color(Colors::TEXT_MUTED));
                                });
                            } else {
                                ui.label("Ålder:");
                                ui.add(egui::TextEdit::singleline(&mut self.form_data.age).desired_width(60.0));
                            }
                            ui.end_row();

                            if editing {
                                ui.label("Senaste kontroll:");
                                ui.horizontal(|ui| {
                                    ui.add(egui::TextEdit::singleline(&mut self.form_data.last_checkup).desired_width(100.0));
                                    ui.label(RichText::new("YYYY-MM-DD").small().color(Colors::TEXT_MUTED));
                                });
                                ui.end_row();
                            }

                            ui.label("Hälsostatus:");
                            egui::ComboBox::from_id_salt("member_form_status")
                                .selected_text(self.form_data.health_status.label())
                                .show_ui(ui, |ui| {
                                    for status in HealthStatus::all() {
                                        ui.selectable_value(&mut self.form_data.health_status, *status, status.label());
                                    }
                                });
                            ui.end_row();

                            ui.label("");
                            ui.checkbox(&mut self.form_data.deceased, "Avliden");
                            ui.end_row();

                            if editing {
                                self.show_parent_fields(ui, state.editing_member_id);
                            } else {
                                self.show_anchor_fields(ui);
                            }
                        });

                    ui.add_space(8.0);
                    ui.label(RichText::new(format!("{} Tillstånd", Icons::HEART)).strong());
                    toggle_labels(ui, COMMON_CONDITIONS, &mut self.form_data.conditions);
                    ui.horizontal(|ui| {
                        ui.label("Övriga:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form_data.custom_conditions)
                                .hint_text("kommaseparerade")
                                .desired_width(260.0),
                        );
                    });

                    let suggestions = suggested_medications(&self.form_data.conditions);
                    if !suggestions.is_empty() {
                        ui.add_space(8.0);
                        ui.label(RichText::new(format!("{} Mediciner", Icons::PILL)).strong());
                        toggle_labels(ui, &suggestions, &mut self.form_data.medications);
                    }

                    ui.add_space(8.0);
                    ui.label(RichText::new("⚠ Allergier").strong());
                    toggle_labels(ui, COMMON_ALLERGIES, &mut self.form_data.allergies);

                    ui.add_space(8.0);
                    ui.label(RichText::new(format!("{} Anteckningar", Icons::NOTE)).strong());
                    ui.add(egui::TextEdit::multiline(&mut self.form_data.notes).desired_rows(3));
                });

                // Felmeddelande
                if let Some(ref error) = self.error_message {
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).color(Colors::ERROR));
                }

                ui.add_space(16.0);

                // Knappar
                ui.horizontal(|ui| {
                    if ui.button("Avbryt").clicked() {
                        self.reset();
                        should_close = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let save = ui.add_enabled(
                            self.form_data.can_save(),
                            egui::Button::new(format!("{} Spara", Icons::SAVE)),
                        );
                        if save.clicked() {
                            match self.save(state, db) {
                                Ok(name) => {
                                    self.reset();
                                    should_close = true;
                                    state.show_success(&format!("{} sparad", name));
                                }
                                Err(e) => {
                                    self.error_message = Some(e);
                                }
                            }
                        }
                    });
                });
            });

        should_close
    }

    fn show_anchor_fields(&mut self, ui: &mut egui::Ui) {
        ui.label("Släkt med:");
        let anchor_text = self
            .form_data
            .anchor_id
            .and_then(|id| self.candidates.iter().find(|m| m.id == Some(id)))
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "Ingen (ny rot)".to_string());
        egui::ComboBox::from_id_salt("member_form_anchor")
            .selected_text(anchor_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.form_data.anchor_id, None, "Ingen (ny rot)");
                for candidate in &self.candidates {
                    ui.selectable_value(&mut self.form_data.anchor_id, candidate.id, &candidate.name);
                }
            });
        ui.end_row();

        if self.form_data.anchor_id.is_some() {
            ui.label("Relation:");
            egui::ComboBox::from_id_salt("member_form_relationship")
                .selected_text(format!(
                    "{} {}",
                    self.form_data.relationship.icon(),
                    self.form_data.relationship.display_name()
                ))
                .show_ui(ui, |ui| {
                    for rel in RelationshipType::all() {
                        ui.selectable_value(
                            &mut self.form_data.relationship,
                            *rel,
                            format!("{} {}", rel.icon(), rel.display_name()),
                        );
                    }
                });
            ui.end_row();
        }
    }

    fn show_parent_fields(&mut self, ui: &mut egui::Ui, editing_id: Option<i64>) {
        ui.label("Förälder:");
        let parent_text = self
            .form_data
            .parent_id
            .and_then(|id| self.candidates.iter().find(|m| m.id == Some(id)))
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "Ingen (rot)".to_string());
        egui::ComboBox::from_id_salt("member_form_parent")
            .selected_text(parent_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.form_data.parent_id, None, "Ingen (rot)");
                for candidate in self.candidates.iter().filter(|m| m.id != editing_id) {
                    ui.selectable_value(&mut self.form_data.parent_id, candidate.id, &candidate.name);
                }
            });
        ui.end_row();

        ui.label("Generation / nivå:");
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut self.form_data.generation));
            ui.add(egui::DragValue::new(&mut self.form_data.level));
        });
        ui.end_row();
    }

    fn load(&mut self, state: &AppState, db: &Database) {
        self.error_message = None;
        self.candidates = db.members().find_all().unwrap_or_else(|e| {
            tracing::error!("Kunde inte läsa medlemmar: {}", e);
            Vec::new()
        });

        self.form_data = match state.editing_member_id {
            Some(id) => match self.candidates.iter().find(|m| m.id == Some(id)) {
                Some(member) => MemberFormData::from_member(member),
                None => {
                    self.error_message = Some("Medlemmen finns inte längre".to_string());
                    MemberFormData::default()
                }
            },
            None => MemberFormData {
                anchor_id: state.form_anchor_id,
                ..Default::default()
            },
        };
        self.loaded_for = Some(state.editing_member_id);
    }

    fn save(&mut self, state: &AppState, db: &Database) -> Result<String, String> {
        let service = state.member_service(db);

        let saved = match state.editing_member_id {
            Some(id) => {
                let patch = self.form_data.to_patch()?;
                service.update(id, patch)
            }
            None => {
                let member = self.form_data.to_new_member()?;
                service.create(member, self.form_data.anchor_id, self.form_data.relationship)
            }
        };

        saved.map(|m| m.name).map_err(|e| e.to_string())
    }

    fn reset(&mut self) {
        self.form_data.clear();
        self.error_message = None;
        self.loaded_for = None;
        self.candidates.clear();
    }
}

/// Kryssrutor för en fast lista etiketter
fn toggle_labels(ui: &mut egui::Ui, labels: &[&str], selected: &mut std::collections::BTreeSet<String>) {
    ui.horizontal_wrapped(|ui| {
        for label in labels {
            let mut checked = selected.contains(*label);
            if ui.checkbox(&mut checked, *label).changed() {
                if checked {
                    selected.insert(label.to_string());
                } else {
                    selected.remove(*label);
                }
            }
        }
    });
}
