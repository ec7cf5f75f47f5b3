//! Heritage Health - släktträd med hälsodata för hela familjen
//!
//! En native desktop-applikation byggd med Rust och egui. Kärnan
//! (modeller, databas och tjänster) är fri från UI-beroenden.

pub mod app;
pub mod db;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

// Re-exports
pub use app::HeritageApp;
pub use db::Database;
pub use models::*;
pub use ui::{AppState, View};
