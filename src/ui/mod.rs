//! Gränssnitt byggt med egui

pub mod modals;
pub mod state;
pub mod theme;
pub mod views;

pub use state::{AppState, StatusType, View};
