//! Detaljvy för en familjemedlem med hälsodata och släktskap

use egui::{self, RichText};

use crate::db::Database;
use crate::services::FamilyGraph;
use crate::ui::{
    state::{AppState, ConfirmAction},
    theme::{Colors, Icons},
    View,
};
use crate::utils::date::format_date;

pub struct MemberDetailView {
    graph: Option<FamilyGraph>,
    needs_refresh: bool,
}

impl MemberDetailView {
    pub fn new() -> Self {
        Self {
            graph: None,
            needs_refresh: true,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, db: &Database) {
        if self.needs_refresh {
            self.graph = match FamilyGraph::load(db) {
                Ok(graph) => Some(graph),
                Err(e) => {
                    state.show_error(&format!("Kunde inte läsa släktträdet: {}", e));
                    None
                }
            };
            self.needs_refresh = false;
        }

        let member = state
            .selected_member_id
            .and_then(|id| self.graph.as_ref().and_then(|g| g.get(id)));

        let Some(member) = member.cloned() else {
            ui.horizontal(|ui| {
                if ui.button(format!("{} Tillbaka", Icons::ARROW_LEFT)).clicked() {
                    state.navigate(View::MemberList);
                }
            });
            ui.vertical_centered(|ui| {
                ui.add_space(50.0);
                ui.label(RichText::new("Medlemmen finns inte längre").color(Colors::TEXT_MUTED));
            });
            return;
        };
        let Some(member_id) = member.id else { return };

        // Header
        ui.horizontal(|ui| {
            if ui.button(format!("{} Tillbaka", Icons::ARROW_LEFT)).clicked() {
                state.navigate(View::FamilyTree);
            }
            ui.separator();
            ui.heading(format!("{} {}", Icons::PERSON, member.name));
            if member.deceased {
                ui.label(RichText::new("Avliden").color(Colors::TEXT_MUTED));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(RichText::new(format!("{} Radera", Icons::DELETE)).color(Colors::ERROR)).clicked() {
                    state.show_confirm(
                        &format!("Radera {}? Barnen blir egna rötter i trädet.", member.name),
                        ConfirmAction::DeleteMember(member_id),
                    );
                }
                if ui.button(format!("{} Redigera", Icons::EDIT)).clicked() {
                    state.open_edit_member_form(member_id);
                }
                if ui.button(format!("{} Lägg till släkting", Icons::ADD)).clicked() {
                    state.open_new_member_form(Some(member_id));
                }
            });
        });

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            section(ui, "Översikt", |ui| {
                egui::Grid::new("member_overview_grid")
                    .num_columns(2)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Ålder:");
                        ui.label(member.age.to_string());
                        ui.end_row();

                        ui.label("Födelsedatum:");
                        ui.label(format_date(member.birth_date));
                        ui.end_row();

                        ui.label("Senaste kontroll:");
                        ui.label(format_date(member.last_checkup));
                        ui.end_row();

                        ui.label("Hälsostatus:");
                        ui.label(
                            RichText::new(format!("{} {}", member.health_icon(), member.health_status.label()))
                                .color(Colors::health_status(member.health_status)),
                        );
                        ui.end_row();

                        ui.label("Generation / nivå:");
                        ui.label(format!("{} / {}", member.generation, member.level));
                        ui.end_row();
                    });
            });

            section(ui, "Hälsa", |ui| {
                label_list(ui, Icons::HEART, "Tillstånd", &member.health_conditions);
                label_list(ui, Icons::PILL, "Mediciner", &member.medications);
                label_list(ui, "⚠", "Allergier", &member.allergies);
            });

            if !member.notes.is_empty() {
                section(ui, "Anteckningar", |ui| {
                    ui.label(format!("{} {}", Icons::NOTE, member.notes));
                });
            }

            if let Some(graph) = &self.graph {
                section(ui, "Släktskap", |ui| {
                    ui.label(format!("Djup i trädet: {}", graph.depth_of(member_id)));
                    ui.add_space(4.0);

                    let ancestors = graph.ancestors_of(member_id);
                    let children = graph.children_of(member_id);
                    let siblings = graph.siblings_of(member_id);

                    for (title, members) in [
                        ("Förälder", ancestors.into_iter().take(1).collect::<Vec<_>>()),
                        ("Barn", children),
                        ("Syskon", siblings),
                    ] {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(RichText::new(format!("{}:", title)).strong());
                            if members.is_empty() {
                                ui.label(RichText::new("Inga").color(Colors::TEXT_MUTED));
                            }
                            for relative in members {
                                if let Some(id) = relative.id {
                                    if ui.link(&relative.name).clicked() {
                                        state.navigate_to_member(id);
                                    }
                                }
                            }
                        });
                    }
                });
            }
        });
    }

    pub fn mark_needs_refresh(&mut self) {
        self.needs_refresh = true;
    }
}

fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().extreme_bg_color)
        .rounding(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).strong());
            ui.add_space(8.0);
            add_contents(ui);
        });
    ui.add_space(12.0);
}

fn label_list(ui: &mut egui::Ui, icon: &str, title: &str, labels: &std::collections::BTreeSet<String>) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{} {}:", icon, title)).strong());
        if labels.is_empty() {
            ui.label(RichText::new("Inga").color(Colors::TEXT_MUTED));
        }
        for label in labels {
            ui.label(RichText::new(label).background_color(ui.visuals().faint_bg_color));
        }
    });
}
