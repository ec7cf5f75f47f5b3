//! Heritage Health - Entry Point

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use heritage_health::{AppSettings, HeritageApp};

fn main() -> eframe::Result<()> {
    // Initiera logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    tracing::info!("Startar Heritage Health v{}", env!("CARGO_PKG_VERSION"));

    let settings = AppSettings::load();

    // Fönsterinställningar
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Heritage Health v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_app_id("heritage-health"),
        ..Default::default()
    };

    // Starta applikationen
    eframe::run_native(
        "Heritage Health",
        options,
        Box::new(|cc| create_app(cc, settings)),
    )
}

fn create_app(
    cc: &eframe::CreationContext<'_>,
    settings: AppSettings,
) -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
    let app = HeritageApp::new(cc, settings)?;
    Ok(Box::new(app))
}
