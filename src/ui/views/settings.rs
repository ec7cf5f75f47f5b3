use egui::{self, RichText};

use crate::models::{config::LANGUAGES, AppSettings};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::path::{get_database_path, get_settings_path};

pub struct SettingsView {
    status_message: Option<String>,
}

impl SettingsView {
    pub fn new() -> Self {
        Self { status_message: None }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, settings: &mut AppSettings) {
        let available_width = ui.available_width();
        let section_width = available_width * 0.8;
        let margin = (available_width - section_width) / 2.0;
        let mut changed = false;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(format!("{} Inställningar", Icons::SETTINGS));
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                ui.add_space(margin);
                ui.vertical(|ui| {
                    ui.set_width(section_width);

                    // Utseende
                    section(ui, "Utseende", |ui| {
                        if ui.checkbox(&mut state.dark_mode, "Mörkt läge").changed() {
                            settings.dark_mode = state.dark_mode;
                            changed = true;
                        }
                        if ui
                            .checkbox(&mut settings.grid_tree_view, "Visa släktträdet som rutnät")
                            .changed()
                        {
                            changed = true;
                        }
                    });

                    // Allmänt
                    section(ui, "Allmänt", |ui| {
                        if ui.checkbox(&mut settings.notifications_enabled, "Påminnelser om hälsokontroller").changed() {
                            changed = true;
                        }

                        ui.horizontal(|ui| {
                            ui.label("Språk:");
                            egui::ComboBox::from_id_salt("language")
                                .selected_text(settings.language.clone())
                                .show_ui(ui, |ui| {
                                    for language in LANGUAGES {
                                        if ui
                                            .selectable_value(&mut settings.language, language.to_string(), *language)
                                            .changed()
                                        {
                                            changed = true;
                                        }
                                    }
                                });
                        });
                        ui.label(
                            RichText::new("Språket är en etikett, gränssnittet översätts inte")
                                .small()
                                .color(Colors::TEXT_MUTED),
                        );
                    });

                    // Integritet
                    section(ui, "Integritet", |ui| {
                        if ui.checkbox(&mut settings.health_data_sharing, "Dela hälsodata med vårdgivare").changed() {
                            changed = true;
                        }
                        ui.label(
                            RichText::new("Ingen data lämnar datorn, inställningen sparas bara lokalt")
                                .small()
                                .color(Colors::TEXT_MUTED),
                        );
                    });

                    // Lagringsplatser
                    section(ui, "Lagringsplatser", |ui| {
                        ui.label(format!("Databas: {}", get_database_path().display()));
                        ui.label(format!("Inställningar: {}", get_settings_path().display()));
                    });

                    if let Some(ref msg) = self.status_message {
                        ui.label(RichText::new(msg).color(Colors::SUCCESS));
                    }
                });
            });
        });

        if changed {
            match settings.save() {
                Ok(()) => self.status_message = Some("Inställningar sparade".to_string()),
                Err(e) => {
                    tracing::error!("Kunde inte spara inställningar: {}", e);
                    state.show_error(&format!("Kunde inte spara inställningar: {}", e));
                }
            }
        }
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
    ui.add_space(16.0);
}
