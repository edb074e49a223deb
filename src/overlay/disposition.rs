//! Disposition selection for a single template file.
//!
//! Rules are evaluated in [`Disposition::PRIORITY`] order and the first match
//! wins. The decision uses the source filename only; dotfile renaming changes
//! where bytes land, never which rule fires.

use std::fmt;

use super::rules::OverlayRules;

/// How one template file is composed onto the project tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Deep merge into the existing manifest, then sort dependencies
    MergeManifest,
    /// Keep the existing build config, write the new one to the side directory
    DeferBuildConfig,
    /// Deep merge into the existing editor settings file
    MergeSettings,
    /// Copy to a destination whose leading marker became `.`
    RenameDotfile,
    /// Copy verbatim, overwriting any existing file
    Copy,
}

/// Facts about a template file that drive disposition
#[derive(Debug, Clone, Copy)]
pub struct FileFacts<'a> {
    /// Source file name
    pub file_name: &'a str,
    /// Name of the source file's parent directory
    pub parent_name: Option<&'a str>,
    /// Whether a file already exists at the (unrenamed) destination path
    pub dest_exists: bool,
}

impl Disposition {
    /// Evaluation order
    pub const PRIORITY: [Disposition; 5] = [
        Disposition::MergeManifest,
        Disposition::DeferBuildConfig,
        Disposition::MergeSettings,
        Disposition::RenameDotfile,
        Disposition::Copy,
    ];

    /// Whether this rule applies to the file
    pub fn matches(self, rules: &OverlayRules, facts: &FileFacts<'_>) -> bool {
        match self {
            Disposition::MergeManifest => {
                facts.dest_exists && facts.file_name == rules.manifest_file
            }
            Disposition::DeferBuildConfig => {
                facts.dest_exists && facts.file_name == rules.build_config_file
            }
            Disposition::MergeSettings => {
                facts.dest_exists
                    && facts.parent_name == Some(rules.settings_dir.as_str())
                    && rules.is_settings_file(facts.file_name)
            }
            Disposition::RenameDotfile => rules.dotfile_name(facts.file_name).is_some(),
            Disposition::Copy => true,
        }
    }

    /// Pick the first matching rule
    pub fn classify(rules: &OverlayRules, facts: &FileFacts<'_>) -> Disposition {
        Self::PRIORITY
            .into_iter()
            .find(|d| d.matches(rules, facts))
            .unwrap_or(Disposition::Copy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::MergeManifest => "merge-manifest",
            Disposition::DeferBuildConfig => "defer-build-config",
            Disposition::MergeSettings => "merge-settings",
            Disposition::RenameDotfile => "rename-dotfile",
            Disposition::Copy => "copy",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
