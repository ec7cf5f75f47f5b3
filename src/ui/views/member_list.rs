use egui::{self, RichText};

use crate::db::Database;
use crate::models::FamilyMember;
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

pub struct MemberListView {
    query: String,
    /// Cache
    members_cache: Vec<FamilyMember>,
    needs_refresh: bool,
}

impl MemberListView {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            members_cache: Vec::new(),
            needs_refresh: true,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, db: &Database) {
        if self.needs_refresh {
            self.refresh_members(db, state);
            self.needs_refresh = false;
        }

        ui.vertical(|ui| {
            // Header
            ui.horizontal(|ui| {
                ui.heading(format!("{} Familjemedlemmar", Icons::PEOPLE));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(format!("{} Ny medlem", Icons::ADD)).clicked() {
                        state.open_new_member_form(None);
                    }
                });
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(Icons::SEARCH);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.query)
                        .hint_text("Sök på namn...")
                        .desired_width(240.0),
                );
                if response.changed() {
                    self.needs_refresh = true;
                }
                ui.label(
                    RichText::new(format!("{} träffar", self.members_cache.len()))
                        .small()
                        .color(Colors::TEXT_MUTED),
                );
            });

            ui.add_space(8.0);
            ui.separator();

            if self.members_cache.is_empty() {
                ui.add_space(20.0);
                ui.label(RichText::new("Inga medlemmar hittades").color(Colors::TEXT_MUTED));
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("member_list_grid")
                    .num_columns(5)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Namn").strong());
                        ui.label(RichText::new("Ålder").strong());
                        ui.label(RichText::new("Status").strong());
                        ui.label(RichText::new("Tillstånd").strong());
                        ui.label("");
                        ui.end_row();

                        for member in &self.members_cache {
                            let Some(id) = member.id else { continue };

                            let name = if member.deceased {
                                format!("{} †", member.name)
                            } else {
                                member.name.clone()
                            };
                            if ui.link(name).clicked() {
                                state.navigate_to_member(id);
                            }
                            ui.label(member.age.to_string());
                            ui.label(
                                RichText::new(format!("{} {}", member.health_icon(), member.health_status.label()))
                                    .color(Colors::health_status(member.health_status)),
                            );
                            ui.label(RichText::new(member.conditions_display()).small());
                            ui.horizontal(|ui| {
                                if ui.small_button(Icons::EDIT).on_hover_text("Redigera").clicked() {
                                    state.open_edit_member_form(id);
                                }
                                if ui.small_button(Icons::ADD).on_hover_text("Lägg till släkting").clicked() {
                                    state.open_new_member_form(Some(id));
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
        });
    }

    fn refresh_members(&mut self, db: &Database, state: &mut AppState) {
        match db.members().search(&self.query) {
            Ok(members) => self.members_cache = members,
            Err(e) => {
                tracing::error!("Sökning misslyckades: {}", e);
                state.show_error(&format!("Kunde inte läsa medlemmar: {}", e));
            }
        }
    }

    pub fn mark_needs_refresh(&mut self) {
        self.needs_refresh = true;
    }
}
