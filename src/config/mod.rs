//! Layered configuration
//!
//! Implements the 3-layer configuration merge:
//! 1. Built-in defaults
//! 2. Config file (--config <path>, TOML)
//! 3. CLI flags

mod defaults;
mod effective;
mod options;

pub use defaults::{BuiltinDefaults, BUNDLED_TEMPLATE_ROOT};
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, Settings};
pub use options::{Features, ScaffoldOptions};
