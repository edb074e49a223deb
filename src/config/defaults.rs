//! Built-in defaults (layer 1)
//!
//! Hardcoded defaults for all configuration values.

use serde::{Deserialize, Serialize};

use crate::overlay::DEFAULT_DEFERRED_DIR;

/// Template trees bundled with the crate
pub const BUNDLED_TEMPLATE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/template/vanilla");

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Directory holding `base` and `config/*` template trees
    pub template_root: String,

    /// Add TypeScript (default: false)
    pub typescript: bool,

    /// Add linter and formatter (default: false)
    pub linter: bool,

    /// Keep end-to-end and unit tests (default: false)
    pub tests: bool,

    /// Side directory for colliding build configs (default: "deferred-configs")
    pub deferred_dir: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            template_root: BUNDLED_TEMPLATE_ROOT.to_string(),
            typescript: false,
            linter: false,
            tests: false,
            deferred_dir: DEFAULT_DEFERRED_DIR.to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "template_root": self.template_root,
            "features": {
                "typescript": self.typescript,
                "linter": self.linter,
                "tests": self.tests
            },
            "overlay": {
                "deferred_dir": self.deferred_dir
            }
        })
    }
}
