use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "heritagehealth";
const APPLICATION: &str = "HeritageHealth";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Hämta databassökväg
pub fn get_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("heritage_health.db"))
        .unwrap_or_else(|| PathBuf::from("heritage_health.db"))
}

/// Hämta sökväg till inställningsfilen
pub fn get_settings_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("settings.toml"))
        .unwrap_or_else(|| PathBuf::from("settings.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_have_expected_file_names() {
        assert!(get_database_path().ends_with("heritage_health.db"));
        assert!(get_settings_path().ends_with("settings.toml"));
    }
}
