//! Filename conventions recognized by the overlay engine.

use serde::{Deserialize, Serialize};

/// Default side directory for colliding build configs
pub const DEFAULT_DEFERRED_DIR: &str = "deferred-configs";

/// Filename conventions that select a disposition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayRules {
    /// Manifest merged across template trees
    pub manifest_file: String,

    /// Single-instance build config deferred on collision
    pub build_config_file: String,

    /// Side directory (sibling of the colliding file) holding deferred configs
    pub deferred_dir: String,

    /// Directory whose settings files are merged
    pub settings_dir: String,

    /// Settings files merged when they live directly under `settings_dir`
    pub settings_files: Vec<String>,

    /// Leading filename marker replaced by `.`
    pub dotfile_marker: char,
}

impl Default for OverlayRules {
    fn default() -> Self {
        Self {
            manifest_file: "package.json".to_string(),
            build_config_file: "rollup.config.js".to_string(),
            deferred_dir: DEFAULT_DEFERRED_DIR.to_string(),
            settings_dir: ".vscode".to_string(),
            settings_files: vec!["extensions.json".to_string(), "settings.json".to_string()],
            dotfile_marker: '_',
        }
    }
}

impl OverlayRules {
    /// Whether `file_name` is a recognized settings file
    pub fn is_settings_file(&self, file_name: &str) -> bool {
        self.settings_files.iter().any(|f| f == file_name)
    }

    /// Destination name for a marked dotfile, `None` if unmarked
    pub fn dotfile_name(&self, file_name: &str) -> Option<String> {
        file_name
            .strip_prefix(self.dotfile_marker)
            .map(|rest| format!(".{}", rest))
    }
}
