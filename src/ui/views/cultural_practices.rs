use egui::{self, RichText};

use crate::db::Database;
use crate::models::CulturalPractice;
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

/// Katalog över kulturella hälsotraditioner
pub struct CulturalPracticesView {
    query: String,
    /// None = alla kategorier
    category: Option<String>,
    categories: Vec<String>,
    practices: Vec<CulturalPractice>,
    expanded: Option<i64>,
    needs_refresh: bool,
}

impl CulturalPracticesView {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            category: None,
            categories: Vec::new(),
            practices: Vec::new(),
            expanded: None,
            needs_refresh: true,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, db: &Database) {
        if self.needs_refresh {
            self.refresh(db, state);
            self.needs_refresh = false;
        }

        ui.heading(format!("{} Kulturella hälsotraditioner", Icons::GLOBE));
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(Icons::SEARCH);
            if ui
                .add(egui::TextEdit::singleline(&mut self.query).hint_text("Sök...").desired_width(200.0))
                .changed()
            {
                self.needs_refresh = true;
            }

            ui.separator();

            if ui.selectable_label(self.category.is_none(), "Alla").clicked() {
                self.category = None;
                self.needs_refresh = true;
            }
            for category in &self.categories {
                let selected = self.category.as_deref() == Some(category.as_str());
                if ui.selectable_label(selected, category).clicked() {
                    self.category = Some(category.clone());
                    self.needs_refresh = true;
                }
            }
        });

        ui.add_space(8.0);
        ui.separator();

        if self.practices.is_empty() {
            ui.label(RichText::new("Inga traditioner matchar").color(Colors::TEXT_MUTED));
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for practice in &self.practices {
                let expanded = practice.id.is_some() && self.expanded == practice.id;

                egui::Frame::none()
                    .fill(ui.visuals().extreme_bg_color)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&practice.name).strong());
                            ui.label(
                                RichText::new(format!("{} · {}", practice.region, practice.category))
                                    .small()
                                    .color(Colors::TEXT_SECONDARY),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let label = if expanded { "Dölj" } else { "Visa mer" };
                                if ui.small_button(label).clicked() {
                                    self.expanded = if expanded { None } else { practice.id };
                                }
                            });
                        });
                        ui.label(&practice.description);

                        if expanded {
                            ui.add_space(6.0);
                            ui.label(RichText::new("Hälsofördelar").color(Colors::SUCCESS));
                            ui.label(&practice.health_benefits);
                            ui.add_space(4.0);
                            ui.label(RichText::new("Att tänka på").color(Colors::WARNING));
                            ui.label(&practice.health_considerations);
                        }
                    });
                ui.add_space(8.0);
            }
        });
    }

    fn refresh(&mut self, db: &Database, state: &mut AppState) {
        let repo = db.practices();

        let result = repo.categories().and_then(|categories| {
            self.categories = categories;
            repo.search(&self.query)
        });

        match result {
            Ok(practices) => {
                self.practices = practices
                    .into_iter()
                    .filter(|p| self.category.as_ref().map_or(true, |c| &p.category == c))
                    .collect();
            }
            Err(e) => {
                tracing::error!("Kunde inte läsa traditioner: {}", e);
                state.show_error(&format!("Kunde inte läsa traditioner: {}", e));
            }
        }
    }

    pub fn mark_needs_refresh(&mut self) {
        self.needs_refresh = true;
    }
}
