use egui::{self, Color32, RichText, Vec2};

use crate::db::Database;
use crate::models::health_catalog::suggested_medications;
use crate::services::{AgeBucketCount, ConditionCount, FamilyGraph, FamilyInsights, AGE_BUCKETS};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

/// Hälsoöversikt för hela familjen
pub struct HealthOverviewView {
    age_histogram: Vec<AgeBucketCount>,
    conditions: Vec<ConditionCount>,
    status_counts: Vec<(crate::models::HealthStatus, usize)>,
    insights: Option<FamilyInsights>,
    suggestions: Vec<&'static str>,
    needs_refresh: bool,
}

impl HealthOverviewView {
    pub fn new() -> Self {
        Self {
            age_histogram: Vec::new(),
            conditions: Vec::new(),
            status_counts: Vec::new(),
            insights: None,
            suggestions: Vec::new(),
            needs_refresh: true,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, db: &Database) {
        if self.needs_refresh {
            self.refresh(db, state);
            self.needs_refresh = false;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(format!("{} Hälsoöversikt", Icons::DASHBOARD));
            ui.add_space(16.0);

            if let Some(insights) = &self.insights {
                ui.horizontal(|ui| {
                    stat_card(ui, Icons::PEOPLE, "Medlemmar", &insights.member_count.to_string(), Colors::PRIMARY);
                    ui.add_space(8.0);
                    let average = insights
                        .average_age
                        .map(|a| format!("{:.1} år", a))
                        .unwrap_or_else(|| "-".to_string());
                    stat_card(ui, Icons::PERSON, "Medelålder", &average, Colors::CHART_AGE);
                    ui.add_space(8.0);
                    let common = insights
                        .most_common_condition
                        .as_ref()
                        .map(|c| format!("{} ({})", c.condition, c.count))
                        .unwrap_or_else(|| "Inga".to_string());
                    stat_card(ui, Icons::HEART, "Vanligaste tillstånd", &common, Colors::CHART_CONDITION);
                });
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                for (status, count) in &self.status_counts {
                    ui.label(
                        RichText::new(format!("{} {}: {}", status.icon(), status.label(), count))
                            .color(Colors::health_status(*status)),
                    );
                    ui.add_space(12.0);
                }
            });

            ui.add_space(24.0);
            ui.heading("Åldersfördelning");
            ui.add_space(8.0);
            let age_bars: Vec<(String, usize)> = self
                .age_histogram
                .iter()
                .map(|b| (b.bucket.label.to_string(), b.count))
                .collect();
            bar_chart(ui, &age_bars, Colors::CHART_AGE);

            ui.add_space(24.0);
            ui.heading("Tillstånd i familjen");
            ui.add_space(8.0);
            if self.conditions.is_empty() {
                ui.label(RichText::new("Inga registrerade tillstånd").color(Colors::TEXT_MUTED));
            } else {
                let condition_bars: Vec<(String, usize)> = self
                    .conditions
                    .iter()
                    .map(|c| (c.condition.clone(), c.count))
                    .collect();
                bar_chart(ui, &condition_bars, Colors::CHART_CONDITION);
            }

            if !self.suggestions.is_empty() {
                ui.add_space(24.0);
                ui.heading(format!("{} Vanliga mediciner för familjens tillstånd", Icons::PILL));
                ui.add_space(8.0);
                ui.horizontal_wrapped(|ui| {
                    for medication in &self.suggestions {
                        ui.label(RichText::new(*medication).background_color(ui.visuals().faint_bg_color));
                    }
                });
            }
        });
    }

    fn refresh(&mut self, db: &Database, state: &mut AppState) {
        let graph = match FamilyGraph::load(db) {
            Ok(graph) => graph,
            Err(e) => {
                state.show_error(&format!("Kunde inte läsa hälsodata: {}", e));
                return;
            }
        };

        self.age_histogram = graph.age_histogram(AGE_BUCKETS);
        self.conditions = graph.condition_frequency();
        self.status_counts = graph.status_counts();
        self.insights = Some(graph.insights());

        let conditions: Vec<String> = self.conditions.iter().map(|c| c.condition.clone()).collect();
        self.suggestions = suggested_medications(&conditions);
    }

    pub fn mark_needs_refresh(&mut self) {
        self.needs_refresh = true;
    }
}

fn stat_card(ui: &mut egui::Ui, icon: &str, label: &str, value: &str, color: Color32) {
    egui::Frame::none()
        .fill(ui.visuals().extreme_bg_color)
        .rounding(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_min_width(160.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(icon).size(24.0).color(color));
                ui.label(RichText::new(value).size(20.0).strong());
                ui.label(RichText::new(label).small().color(Colors::TEXT_SECONDARY));
            });
        });
}

/// Enkelt liggande stapeldiagram
fn bar_chart(ui: &mut egui::Ui, bars: &[(String, usize)], color: Color32) {
    let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);
    let max_width = (ui.available_width() - 200.0).max(100.0);

    egui::Grid::new(ui.next_auto_id())
        .num_columns(3)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for (label, count) in bars {
                ui.label(label);
                let width = max_width * *count as f32 / max as f32;
                let (rect, _) = ui.allocate_exact_size(Vec2::new(max_width, 16.0), egui::Sense::hover());
                let bar = egui::Rect::from_min_size(rect.min, Vec2::new(width, rect.height()));
                ui.painter().rect_filled(bar, 3.0, color);
                ui.label(count.to_string());
                ui.end_row();
            }
        });
}
