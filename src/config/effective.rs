//! Effective configuration with provenance
//!
//! The effective config captures the merged configuration plus
//! information about where each layer came from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use userscript_manifest::merge_layers;

use super::defaults::BuiltinDefaults;
use super::options::Features;
use crate::overlay::OverlayRules;

/// Origin of a configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing config layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this layer
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Typed view of the merged configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub template_root: PathBuf,

    #[serde(default)]
    pub features: Features,

    #[serde(default)]
    pub overlay: OverlayRules,
}

/// Effective configuration with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    /// The merged configuration object
    pub config: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build effective config from layers
    pub fn build(config_path: Option<&Path>, cli_overrides: Option<Value>) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        layers.push(BuiltinDefaults::default().to_value());
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
        });

        // Layer 2: Config file. An explicitly named file must exist.
        if let Some(path) = config_path {
            layers.push(Self::load_toml_file(path)?);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
            });
        }

        // Layer 3: CLI overrides
        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
            });
        }

        let merged = merge_layers(layers);
        Self::validate_config(&merged)?;

        Ok(Self {
            config: merged,
            sources,
        })
    }

    /// Load and parse a TOML file into a JSON value
    fn load_toml_file(path: &Path) -> Result<Value, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        toml::from_str::<Value>(&contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error in {}: {}", path.display(), e)))
    }

    /// Validate configuration values
    fn validate_config(config: &Value) -> Result<(), ConfigError> {
        match config.get("template_root").and_then(|v| v.as_str()) {
            Some(root) if !root.trim().is_empty() => {}
            _ => {
                return Err(ConfigError::ValidationError(
                    "template_root must be a non-empty string".to_string(),
                ))
            }
        }

        if let Some(dir) = config.pointer("/overlay/deferred_dir") {
            let valid = dir
                .as_str()
                .map(|d| !d.is_empty() && !d.contains('/') && !d.contains('\\') && d != "." && d != "..")
                .unwrap_or(false);
            if !valid {
                return Err(ConfigError::ValidationError(
                    "overlay.deferred_dir must be a single directory name".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Deserialize the merged configuration
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        serde_json::from_value(self.config.clone())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Get a config value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.config;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Get a config value as string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Get a config value as bool
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
