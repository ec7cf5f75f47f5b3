use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::path::get_settings_path;

/// Språk som kan väljas i inställningarna (endast en etikett)
pub const LANGUAGES: &[&str] = &["English", "Spanish", "French", "Chinese", "Arabic"];

/// Användarinställningar som inte sparas i databasen.
///
/// Kärnan läser aldrig dessa, de styr bara presentationen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub dark_mode: bool,
    pub notifications_enabled: bool,
    pub health_data_sharing: bool,
    pub language: String,
    /// Visa släktträdet som rutnät (generation/nivå) istället för hierarki
    pub grid_tree_view: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications_enabled: true,
            health_data_sharing: false,
            language: LANGUAGES[0].to_string(),
            grid_tree_view: false,
            window_width: 1280.0,
            window_height: 800.0,
        }
    }
}

impl AppSettings {
    /// Ladda från standardplatsen, eller defaults om filen saknas/är trasig
    pub fn load() -> Self {
        Self::load_from(&get_settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Ogiltig inställningsfil {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&get_settings_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_settings_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let settings = AppSettings {
            dark_mode: true,
            language: "French".into(),
            grid_tree_view: true,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_app_settings_backwards_compat() {
        // Gammal TOML med bara några fält, resten ska bli defaults
        let old_toml = r#"
dark_mode = true
language = "Arabic"
"#;
        let loaded: AppSettings = toml::from_str(old_toml).unwrap();
        assert!(loaded.dark_mode);
        assert_eq!(loaded.language, "Arabic");
        assert!(loaded.notifications_enabled);
        assert!(!loaded.health_data_sharing);
    }

    #[test]
    fn test_missing_or_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("saknas.toml");
        assert_eq!(AppSettings::load_from(&missing), AppSettings::default());

        let broken = dir.path().join("trasig.toml");
        std::fs::write(&broken, "dark_mode = [").unwrap();
        assert_eq!(AppSettings::load_from(&broken), AppSettings::default());
    }
}
