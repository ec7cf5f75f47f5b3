use std::collections::BTreeSet;

use egui::{self, RichText};

use crate::models::health_resource::filter_resources;
use crate::models::HealthCategory;
use crate::ui::theme::{Colors, Icons};

/// Länklista med hälsoresurser. Bokmärken gäller bara för sessionen.
pub struct HealthResourcesView {
    query: String,
    category: Option<HealthCategory>,
    bookmarks: BTreeSet<&'static str>,
    only_bookmarks: bool,
}

impl HealthResourcesView {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            category: None,
            bookmarks: BTreeSet::new(),
            only_bookmarks: false,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!("{} Hälsoresurser", Icons::LINK));
        ui.label(
            RichText::new("Betrodd information och stöd för familjens hälsa")
                .color(Colors::TEXT_SECONDARY),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(Icons::SEARCH);
            ui.add(egui::TextEdit::singleline(&mut self.query).hint_text("Sök resurser...").desired_width(200.0));
            ui.separator();
            ui.toggle_value(&mut self.only_bookmarks, format!("{} Bokmärken", Icons::BOOKMARK));
        });

        ui.horizontal_wrapped(|ui| {
            if ui.selectable_label(self.category.is_none(), "Alla").clicked() {
                self.category = None;
            }
            for category in HealthCategory::all() {
                let text = RichText::new(format!("{} {}", category.icon(), category.display_name()))
                    .color(Colors::health_category(*category));
                if ui.selectable_label(self.category == Some(*category), text).clicked() {
                    self.category = Some(*category);
                }
            }
        });

        ui.add_space(8.0);
        ui.separator();

        let resources: Vec<_> = filter_resources(self.category, &self.query)
            .into_iter()
            .filter(|r| !self.only_bookmarks || self.bookmarks.contains(r.url))
            .collect();

        if resources.is_empty() {
            ui.label(RichText::new("Inga resurser matchar").color(Colors::TEXT_MUTED));
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for resource in resources {
                let bookmarked = self.bookmarks.contains(resource.url);

                egui::Frame::none()
                    .fill(ui.visuals().extreme_bg_color)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(resource.category.icon())
                                    .color(Colors::health_category(resource.category)),
                            );
                            ui.hyperlink_to(RichText::new(resource.title).strong(), resource.url);
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let hover = if bookmarked { "Ta bort bokmärke" } else { "Lägg till bokmärke" };
                                if ui
                                    .selectable_label(bookmarked, Icons::BOOKMARK)
                                    .on_hover_text(hover)
                                    .clicked()
                                {
                                    if bookmarked {
                                        self.bookmarks.remove(resource.url);
                                    } else {
                                        self.bookmarks.insert(resource.url);
                                    }
                                }
                            });
                        });
                        ui.label(resource.description);
                        ui.label(
                            RichText::new(format!("{} · {}", resource.category.display_name(), resource.url))
                                .small()
                                .color(Colors::TEXT_SECONDARY),
                        );
                    });
                ui.add_space(8.0);
            }
        });
    }
}
