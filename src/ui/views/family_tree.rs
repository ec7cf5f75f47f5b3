//! Släktträd-vy som ritar layouten på en panorerbar yta

use egui::{self, Color32, Pos2, Rect, RichText, Stroke, Vec2};

use crate::db::Database;
use crate::models::AppSettings;
use crate::services::{CanvasSize, FamilyGraph, FamilyTree, LayoutEngine, LayoutMode};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

/// Vy för att visa släktträdet
pub struct FamilyTreeView {
    /// Cachad graf, byggs om efter varje ändring
    graph: Option<FamilyGraph>,
    /// Cachad layout
    tree: Option<FamilyTree>,
    /// Ytan layouten beräknades för
    layout_size: Option<Vec2>,
    mode: LayoutMode,
    /// Pan offset
    pan_offset: Vec2,
    /// Zoom level
    zoom: f32,
    /// Behöver refresh
    needs_refresh: bool,
}

impl Default for FamilyTreeView {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyTreeView {
    pub fn new() -> Self {
        Self {
            graph: None,
            tree: None,
            layout_size: None,
            mode: LayoutMode::Hierarchy,
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
            needs_refresh: true,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, db: &Database, settings: &mut AppSettings) {
        let mode = if settings.grid_tree_view {
            LayoutMode::Grid
        } else {
            LayoutMode::Hierarchy
        };
        if mode != self.mode {
            self.mode = mode;
            self.tree = None;
            self.pan_offset = Vec2::ZERO;
        }

        if self.needs_refresh {
            self.refresh(db, state);
        }

        self.show_header(ui, state, settings);

        ui.separator();

        let is_empty = self.graph.as_ref().map_or(true, FamilyGraph::is_empty);
        if is_empty {
            ui.vertical_centered(|ui| {
                ui.add_space(50.0);
                ui.label(RichText::new("Inga familjemedlemmar ännu").color(Colors::TEXT_MUTED));
                ui.add_space(20.0);
                if ui.button(format!("{} Lägg till första medlemmen", Icons::ADD)).clicked() {
                    state.open_new_member_form(None);
                }
            });
            return;
        }

        self.show_tree_canvas(ui, state);
    }

    fn show_header(&mut self, ui: &mut egui::Ui, state: &mut AppState, settings: &mut AppSettings) {
        ui.horizontal(|ui| {
            ui.heading(format!("{} Släktträd", Icons::TREE));

            if let Some(graph) = &self.graph {
                ui.label(
                    RichText::new(format!("{} medlemmar", graph.len()))
                        .color(Colors::TEXT_SECONDARY),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(format!("{} Ny medlem", Icons::ADD)).clicked() {
                    state.open_new_member_form(None);
                }

                ui.separator();

                // Zoom-kontroller
                if ui.button("➕").on_hover_text("Zooma in").clicked() {
                    self.zoom = (self.zoom * 1.2).min(3.0);
                }
                ui.label(format!("{:.0}%", self.zoom * 100.0));
                if ui.button("➖").on_hover_text("Zooma ut").clicked() {
                    self.zoom = (self.zoom / 1.2).max(0.3);
                }

                ui.separator();

                // Layoutläge, sparas i inställningarna
                for mode in [LayoutMode::Grid, LayoutMode::Hierarchy] {
                    if ui.selectable_label(self.mode == mode, mode.display_name()).clicked() && self.mode != mode {
                        settings.grid_tree_view = mode == LayoutMode::Grid;
                        if let Err(e) = settings.save() {
                            tracing::warn!("Kunde inte spara inställningar: {}", e);
                        }
                    }
                }

                ui.separator();

                if ui.button("Återställ vy").clicked() {
                    self.pan_offset = Vec2::ZERO;
                    self.zoom = 1.0;
                }
            });
        });
    }

    fn show_tree_canvas(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let rect = response.rect;

        // Hierarkin normaliseras mot ytan och måste räknas om när den ändras
        let needs_layout = self.tree.is_none()
            || (self.mode == LayoutMode::Hierarchy && self.layout_size != Some(rect.size()));
        if needs_layout {
            if let Some(graph) = &self.graph {
                let canvas = CanvasSize::new(rect.width(), rect.height());
                self.tree = Some(LayoutEngine::new(self.mode).layout(graph, canvas));
                self.layout_size = Some(rect.size());
            }
        }
        let Some(tree) = &self.tree else { return };

        // Hantera pan (drag)
        if response.dragged() {
            self.pan_offset += response.drag_delta();
        }

        // Hantera zoom med scroll
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta != 0.0 {
                let zoom_factor = 1.0 + scroll_delta * 0.001;
                self.zoom = (self.zoom * zoom_factor).clamp(0.3, 3.0);
            }
        }

        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        // Rutnätet har origo i mitten, hierarkin i övre vänstra hörnet
        let origin = match self.mode {
            LayoutMode::Hierarchy => rect.min,
            LayoutMode::Grid => rect.center(),
        };
        let zoom = self.zoom;
        let pan = self.pan_offset;
        let transform = |(x, y): (f32, f32)| -> Pos2 {
            Pos2::new(origin.x + x * zoom + pan.x, origin.y + y * zoom + pan.y)
        };

        // Rita länkar först (under noderna)
        let link_stroke = Stroke::new(2.0 * zoom, Colors::TEXT_SECONDARY);
        for link in &tree.links {
            painter.line_segment([transform(link.from), transform(link.to)], link_stroke);
        }

        let radius = 24.0 * zoom;
        let mut clicked_member: Option<i64> = None;
        let mut double_clicked_member: Option<i64> = None;

        // Sortera för stabil ritordning
        let mut nodes: Vec<_> = tree.nodes.iter().collect();
        nodes.sort_by_key(|(id, _)| **id);

        for (member_id, node) in nodes {
            let pos = transform((node.x, node.y));
            let node_rect = Rect::from_center_size(pos, Vec2::splat(radius * 2.0));

            if !rect.intersects(node_rect) {
                continue;
            }

            let is_selected = state.selected_member_id == Some(*member_id);
            let status_color = Colors::health_status(node.member.health_status);
            let fill = if node.member.deceased {
                ui.visuals().widgets.inactive.bg_fill
            } else {
                status_color.gamma_multiply(0.25)
            };

            painter.circle_filled(pos, radius, fill);
            painter.circle_stroke(
                pos,
                radius,
                Stroke::new(if is_selected { 3.0 } else { 1.5 }, if is_selected { Colors::PRIMARY } else { status_color }),
            );

            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                node.member.initial(),
                egui::FontId::proportional(18.0 * zoom),
                ui.visuals().text_color(),
            );

            painter.text(
                pos + Vec2::new(0.0, radius + 10.0 * zoom),
                egui::Align2::CENTER_CENTER,
                &node.member.name,
                egui::FontId::proportional(13.0 * zoom),
                ui.visuals().text_color(),
            );

            painter.text(
                pos + Vec2::new(radius * 0.8, -radius * 0.8),
                egui::Align2::CENTER_CENTER,
                node.member.health_icon(),
                egui::FontId::proportional(12.0 * zoom),
                status_color,
            );

            if let Some(click_pos) = response.interact_pointer_pos() {
                if node_rect.contains(click_pos) {
                    if response.double_clicked() {
                        double_clicked_member = Some(*member_id);
                    } else if response.clicked() {
                        clicked_member = Some(*member_id);
                    }
                }
            }
        }

        // Dubbelklick lägger till en släkting, enkelklick öppnar detaljer
        if let Some(id) = double_clicked_member {
            state.open_new_member_form(Some(id));
        } else if let Some(id) = clicked_member {
            state.navigate_to_member(id);
        }

        let instructions = "Dra för att panorera • Scrolla för att zooma • Klicka för detaljer • Dubbelklicka för att lägga till släkting";
        painter.text(
            Pos2::new(rect.center().x, rect.bottom() - 20.0),
            egui::Align2::CENTER_CENTER,
            instructions,
            egui::FontId::proportional(11.0),
            Colors::TEXT_MUTED,
        );

        if tree.links.is_empty() && tree.nodes.len() > 1 {
            painter.text(
                Pos2::new(rect.center().x, rect.top() + 16.0),
                egui::Align2::CENTER_CENTER,
                "Inga förälder-barn-länkar ännu",
                egui::FontId::proportional(11.0),
                Color32::from_gray(140),
            );
        }
    }

    fn refresh(&mut self, db: &Database, state: &mut AppState) {
        match FamilyGraph::load(db) {
            Ok(graph) => self.graph = Some(graph),
            Err(e) => {
                tracing::error!("Kunde inte läsa släktträdet: {}", e);
                state.show_error(&format!("Kunde inte läsa släktträdet: {}", e));
                self.graph = None;
            }
        }
        self.tree = None;
        self.needs_refresh = false;
    }

    pub fn mark_needs_refresh(&mut self) {
        self.needs_refresh = true;
    }
}
