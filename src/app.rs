//! Huvudapplikation för Heritage Health

use eframe::egui;

use crate::db::Database;
use crate::models::AppSettings;
use crate::ui::{
    modals::{ConfirmDialog, MemberFormModal},
    state::AppState,
    theme::{configure_style, Colors},
    views::{
        CulturalPracticesView, FamilyTreeView, HealthOverviewView, HealthResourcesView, MemberDetailView,
        MemberListView, SettingsView,
    },
    StatusType, View,
};
use crate::utils::path::get_database_path;

/// Huvudapplikation
pub struct HeritageApp {
    db: Database,
    state: AppState,
    app_settings: AppSettings,

    // Vyer
    family_tree: FamilyTreeView,
    member_list: MemberListView,
    member_detail: MemberDetailView,
    health_overview: HealthOverviewView,
    health_resources: HealthResourcesView,
    cultural_practices: CulturalPracticesView,
    settings: SettingsView,

    // Modals
    member_form_modal: MemberFormModal,

    // Intern
    applied_dark_mode: Option<bool>,
}

impl HeritageApp {
    /// Skapa ny applikation
    pub fn new(_cc: &eframe::CreationContext<'_>, app_settings: AppSettings) -> anyhow::Result<Self> {
        let db_path = get_database_path();
        tracing::info!("Öppnar databas: {:?}", db_path);

        let db = match Database::open(&db_path) {
            Ok(db) => {
                db.migrate()?;
                db
            }
            Err(e) => {
                tracing::error!("Kunde inte öppna databas: {}", e);
                // Fortsätt utan persistens
                Database::open_in_memory()?
            }
        };

        let mut state = AppState::new();
        state.dark_mode = app_settings.dark_mode;

        Ok(Self {
            db,
            state,
            app_settings,
            family_tree: FamilyTreeView::new(),
            member_list: MemberListView::new(),
            member_detail: MemberDetailView::new(),
            health_overview: HealthOverviewView::new(),
            health_resources: HealthResourcesView::new(),
            cultural_practices: CulturalPracticesView::new(),
            settings: SettingsView::new(),
            member_form_modal: MemberFormModal::new(),
            applied_dark_mode: None,
        })
    }

    /// Alla vyer läser om sina data efter en ändring i trädet
    fn refresh_all_views(&mut self) {
        self.family_tree.mark_needs_refresh();
        self.member_list.mark_needs_refresh();
        self.member_detail.mark_needs_refresh();
        self.health_overview.mark_needs_refresh();
    }

    /// Hantera navigation och uppdatera relevanta vyer
    fn handle_view_change(&mut self, new_view: View) {
        match new_view {
            View::FamilyTree => self.family_tree.mark_needs_refresh(),
            View::MemberList => self.member_list.mark_needs_refresh(),
            View::MemberDetail => self.member_detail.mark_needs_refresh(),
            View::HealthOverview => self.health_overview.mark_needs_refresh(),
            View::HealthResources => {}
            View::CulturalPractices => self.cultural_practices.mark_needs_refresh(),
            View::Settings => {}
        }
    }

    fn navigate_to(&mut self, view: View) {
        let old = self.state.current_view;
        self.state.current_view = view;
        if old != view {
            self.handle_view_change(view);
        }
    }
}

impl eframe::App for HeritageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Konfigurera stil första gången och när läget ändrats
        if self.applied_dark_mode != Some(self.state.dark_mode) {
            configure_style(ctx, self.state.dark_mode);
            self.applied_dark_mode = Some(self.state.dark_mode);
        }

        // Rensa gamla statusmeddelanden
        self.state.clear_old_status();

        // Medlemstjänsten har sparat en ändring
        if self.state.tree_changed.take() {
            self.refresh_all_views();
        }

        let view_before = self.state.current_view;

        // Topbar
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Heritage Health");
                ui.separator();

                let nav_items = [
                    (View::FamilyTree, "🌳 Släktträd"),
                    (View::MemberList, "👥 Medlemmar"),
                    (View::HealthOverview, "📊 Hälsa"),
                    (View::HealthResources, "🔗 Resurser"),
                    (View::CulturalPractices, "🌍 Traditioner"),
                ];

                for (view, label) in nav_items {
                    if ui.selectable_label(self.state.current_view == view, label).clicked() {
                        self.state.current_view = view;
                    }
                }

                // Höger sida
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_icon = if self.state.dark_mode { "🌙" } else { "☀" };
                    if ui.button(mode_icon).on_hover_text("Växla mörkt läge").clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        self.app_settings.dark_mode = self.state.dark_mode;
                        if let Err(e) = self.app_settings.save() {
                            tracing::warn!("Kunde inte spara inställningar: {}", e);
                        }
                    }

                    if ui
                        .selectable_label(self.state.current_view == View::Settings, "⚙")
                        .on_hover_text("Inställningar")
                        .clicked()
                    {
                        self.state.current_view = View::Settings;
                    }

                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .small()
                            .weak(),
                    );
                });
            });
        });

        // Statusbar
        if let Some(ref status) = self.state.status_message {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                let color = match status.status_type {
                    StatusType::Success => Colors::SUCCESS,
                    StatusType::Error => Colors::ERROR,
                    StatusType::Warning => Colors::WARNING,
                    StatusType::Info => Colors::INFO,
                };
                ui.colored_label(color, &status.text);
            });
        }

        // Huvudinnehåll
        egui::CentralPanel::default().show(ctx, |ui| match self.state.current_view {
            View::FamilyTree => {
                self.family_tree
                    .show(ui, &mut self.state, &self.db, &mut self.app_settings);
            }
            View::MemberList => {
                self.member_list.show(ui, &mut self.state, &self.db);
            }
            View::MemberDetail => {
                self.member_detail.show(ui, &mut self.state, &self.db);
            }
            View::HealthOverview => {
                self.health_overview.show(ui, &mut self.state, &self.db);
            }
            View::HealthResources => {
                self.health_resources.show(ui);
            }
            View::CulturalPractices => {
                self.cultural_practices.show(ui, &mut self.state, &self.db);
            }
            View::Settings => {
                self.settings.show(ui, &mut self.state, &mut self.app_settings);
            }
        });

        // Modals
        if self.state.show_member_form && self.member_form_modal.show(ctx, &mut self.state, &self.db) {
            self.state.close_member_form();
        }

        if self.state.show_confirm_dialog {
            ConfirmDialog::show(ctx, &mut self.state, &self.db);
        }

        // Vyer som byttes under ramen läser om sina data
        let view_after = self.state.current_view;
        if view_after != view_before {
            self.state.current_view = view_before;
            self.navigate_to(view_after);
        }

        // Ändringar som sparades under den här ramen
        if self.state.tree_changed.take() {
            self.refresh_all_views();
            ctx.request_repaint();
        }
    }
}
