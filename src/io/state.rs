use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json beside the task file)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Favorites-only filter was on
    #[serde(default)]
    pub favorites_only: bool,
    /// Cursor row in the displayed list
    #[serde(default)]
    pub cursor: usize,
}

fn state_path(data_dir: &Path) -> std::path::PathBuf {
    data_dir.join(".state.json")
}

/// Read .state.json from the data directory; any failure yields `None`
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(state_path(data_dir)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(state_path(data_dir), content)
}
