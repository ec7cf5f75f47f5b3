pub mod member;
pub mod relationship;
pub mod practice;
pub mod health_catalog;
pub mod health_resource;
pub mod config;

pub use member::*;
pub use relationship::*;
pub use practice::*;
pub use health_resource::{HealthCategory, HealthResource};
pub use config::*;
