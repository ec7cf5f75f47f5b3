use egui::{Color32, FontFamily, FontId, TextStyle, Visuals};

use crate::models::{HealthCategory, HealthStatus};

/// Konfigurera applikationens utseende
pub fn configure_style(ctx: &egui::Context, dark_mode: bool) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = [
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(11.5, FontFamily::Proportional)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.spacing.window_margin = egui::Margin::same(14.0);

    style.visuals = if dark_mode {
        visuals(Visuals::dark(), &DARK)
    } else {
        visuals(Visuals::light(), &LIGHT)
    };

    ctx.set_style(style);
}

/// Bakgrunder och accent för ett läge
struct Palette {
    panel: Color32,
    window: Color32,
    extreme: Color32,
    /// Widgetbakgrund: vilande, inaktiv, hover, aktiv
    widgets: [Color32; 4],
    selection: Color32,
    link: Color32,
}

// Mörkt läge med grönblå ton, ljust läge med varm pappersbakgrund
const DARK: Palette = Palette {
    panel: Color32::from_rgb(24, 32, 33),
    window: Color32::from_rgb(32, 42, 43),
    extreme: Color32::from_rgb(16, 22, 23),
    widgets: [
        Color32::from_rgb(38, 50, 51),
        Color32::from_rgb(44, 58, 59),
        Color32::from_rgb(54, 72, 73),
        Color32::from_rgb(64, 88, 88),
    ],
    selection: Color32::from_rgb(15, 118, 110),
    link: Color32::from_rgb(94, 234, 212),
};

const LIGHT: Palette = Palette {
    panel: Color32::from_rgb(250, 248, 244),
    window: Color32::from_rgb(255, 255, 252),
    extreme: Color32::from_rgb(241, 238, 231),
    widgets: [
        Color32::from_rgb(236, 233, 226),
        Color32::from_rgb(229, 226, 218),
        Color32::from_rgb(214, 230, 226),
        Color32::from_rgb(190, 219, 213),
    ],
    selection: Color32::from_rgb(153, 220, 208),
    link: Color32::from_rgb(13, 110, 100),
};

fn visuals(mut visuals: Visuals, palette: &Palette) -> Visuals {
    visuals.panel_fill = palette.panel;
    visuals.window_fill = palette.window;
    visuals.extreme_bg_color = palette.extreme;

    let [noninteractive, inactive, hovered, active] = palette.widgets;
    visuals.widgets.noninteractive.bg_fill = noninteractive;
    visuals.widgets.inactive.bg_fill = inactive;
    visuals.widgets.hovered.bg_fill = hovered;
    visuals.widgets.active.bg_fill = active;

    visuals.selection.bg_fill = palette.selection;
    visuals.hyperlink_color = palette.link;

    visuals
}

/// Färgpalett för applikationen
pub struct Colors;

impl Colors {
    // Primär (grönblå)
    pub const PRIMARY: Color32 = Color32::from_rgb(13, 148, 136);

    // Framgång
    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);

    // Varning
    pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);

    // Fel
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);

    // Info
    pub const INFO: Color32 = Color32::from_rgb(59, 130, 246);

    // Text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(107, 114, 128);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(156, 163, 175);

    // Diagram
    pub const CHART_AGE: Color32 = Color32::from_rgb(147, 51, 234);
    pub const CHART_CONDITION: Color32 = Color32::from_rgb(20, 184, 166);

    /// Färg för en hälsostatus
    pub fn health_status(status: HealthStatus) -> Color32 {
        match status {
            HealthStatus::Healthy => Self::SUCCESS,
            HealthStatus::AtRisk => Self::WARNING,
            HealthStatus::NeedsAttention => Color32::from_rgb(249, 115, 22),
            HealthStatus::Critical => Self::ERROR,
        }
    }

    /// Färg för en resurskategori
    pub fn health_category(category: HealthCategory) -> Color32 {
        match category {
            HealthCategory::Heart => Self::ERROR,
            HealthCategory::Diabetes => Color32::from_rgb(249, 115, 22),
            HealthCategory::Cancer => Self::CHART_AGE,
            HealthCategory::Asthma => Self::SUCCESS,
            HealthCategory::Mental => Self::INFO,
            HealthCategory::Nutrition => Self::CHART_CONDITION,
            HealthCategory::Exercise => Color32::from_rgb(99, 102, 241),
            HealthCategory::General => Self::TEXT_SECONDARY,
        }
    }
}

/// Ikoner (Unicode)
pub struct Icons;

impl Icons {
    pub const PERSON: &'static str = "👤";
    pub const PEOPLE: &'static str = "👥";
    pub const TREE: &'static str = "🌳";
    pub const SEARCH: &'static str = "🔍";
    pub const SETTINGS: &'static str = "⚙";
    pub const ADD: &'static str = "➕";
    pub const EDIT: &'static str = "✏";
    pub const DELETE: &'static str = "🗑";
    pub const SAVE: &'static str = "💾";
    pub const ARROW_LEFT: &'static str = "←";
    pub const NOTE: &'static str = "📝";
    pub const DASHBOARD: &'static str = "📊";
    pub const HEART: &'static str = "❤";
    pub const GLOBE: &'static str = "🌍";
    pub const PILL: &'static str = "💊";
    pub const LINK: &'static str = "🔗";
    pub const BOOKMARK: &'static str = "🔖";
}
