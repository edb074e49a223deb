//! Immutable options record handed to the scaffold pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::effective::Settings;
use crate::overlay::OverlayRules;
use crate::package_name::{is_valid_package_name, to_valid_package_name};

/// Optional features selected by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub typescript: bool,
    pub linter: bool,
    pub tests: bool,
}

/// Everything the pipeline needs; the core never reads argv or the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldOptions {
    /// Project directory to create or reuse
    pub target_dir: PathBuf,
    /// Name shown to the user
    pub project_name: String,
    /// `name` field of the generated manifest
    pub package_name: String,
    pub features: Features,
    /// Empty a non-empty target directory instead of failing
    pub force: bool,
    /// Directory holding `base` and `config/*` template trees
    pub template_root: PathBuf,
    pub rules: OverlayRules,
}

impl ScaffoldOptions {
    /// Options for `project_name`, with a package name derived from it
    pub fn new(target_dir: PathBuf, project_name: &str, settings: Settings) -> Self {
        let package_name = if is_valid_package_name(project_name) {
            project_name.to_string()
        } else {
            to_valid_package_name(project_name)
        };

        Self {
            target_dir,
            project_name: project_name.to_string(),
            package_name,
            features: settings.features,
            force: false,
            template_root: settings.template_root,
            rules: settings.overlay,
        }
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
