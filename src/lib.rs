//! create-userscript - scaffold a userscript project from template trees
//!
//! This crate composes independently authored template trees onto a project
//! directory. Manifests and editor settings are deep-merged rather than
//! overwritten, colliding build configs are set aside per template, and
//! post-processing passes rename sources or prune test directories based on
//! the selected features.

pub mod config;
pub mod fs;
pub mod overlay;
pub mod package_manager;
pub mod package_name;
pub mod postprocess;
pub mod scaffold;
pub mod template;
pub mod traverse;

pub use config::{EffectiveConfig, Features, ScaffoldOptions, Settings};
pub use fs::{DiskFs, FileSystem, MemoryFs};
pub use overlay::{Disposition, Overlay, OverlayError, OverlayReport, OverlayRules};
pub use package_manager::PackageManager;
pub use scaffold::{ScaffoldError, ScaffoldReport, Scaffolder};
pub use userscript_manifest::{deep_merge, sort_dependencies, Manifest, ManifestError};
