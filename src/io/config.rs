use std::fs;
use std::path::Path;

use crate::model::config::Config;

/// Read config.toml from the data directory. Missing or unparsable config
/// yields the defaults; configuration problems never block startup.
pub fn read_config(data_dir: &Path) -> Config {
    fs::read_to_string(data_dir.join("config.toml"))
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = read_config(dir.path());
        assert!(config.confirm_delete);
        assert_eq!(config.default_priority, "Medium");
    }

    #[test]
    fn bad_toml_yields_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "confirm_delete = maybe").unwrap();
        assert!(read_config(dir.path()).confirm_delete);
    }

    #[test]
    fn overrides_are_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "default_priority = \"High\"\nconfirm_delete = false\n",
        )
        .unwrap();
        let config = read_config(dir.path());
        assert_eq!(config.default_priority, "High");
        assert!(!config.confirm_delete);
    }
}
