use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml (all optional, sensible defaults)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Priority preselected in the add prompt
    #[serde(default = "default_priority")]
    pub default_priority: String,
    /// Ask before deleting a task
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_priority: default_priority(),
            confirm_delete: true,
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_priority() -> String {
    "Medium".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_on_empty_table() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.default_priority, "Medium");
        assert!(config.confirm_delete);
        assert!(config.ui.show_key_hints);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_overrides() {
        let config: Config = toml::from_str(
            r##"
confirm_delete = false

[ui.colors]
highlight = "#FF0000"
"##,
        )
        .unwrap();
        assert!(!config.confirm_delete);
        assert_eq!(config.default_priority, "Medium");
        assert_eq!(config.ui.colors["highlight"], "#FF0000");
    }
}
