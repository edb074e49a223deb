//! Scaffold pipeline
//!
//! Composes a project from the options record:
//! - Validate that every planned template tree exists
//! - Prepare the target directory (create, or empty with `force`)
//! - Write the initial manifest
//! - Apply template trees in plan order
//! - Run language conversion (typescript) and test pruning (no tests)
//!
//! Steps run strictly in sequence; each overlay reads the state the previous
//! one left behind.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;
use userscript_manifest::{Manifest, ManifestError};

use crate::config::{ConfigError, ScaffoldOptions};
use crate::fs::FileSystem;
use crate::overlay::{Overlay, OverlayError, OverlayReport};
use crate::postprocess::{ConversionReport, LanguageConversion, PostProcessError, PruneRules};
use crate::template::template_dirs;
use crate::traverse::{can_safely_overwrite, empty_dir};

/// Version written into the initial manifest
pub const INITIAL_VERSION: &str = "0.0.0";

/// Scaffold errors
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("target directory {0} is not empty (use --force to overwrite)")]
    TargetNotEmpty(PathBuf),

    #[error("template not found: {0}")]
    TemplateMissing(PathBuf),

    #[error("overlay error: {0}")]
    Overlay(#[from] OverlayError),

    #[error("post-processing error: {0}")]
    PostProcess(#[from] PostProcessError),

    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScaffoldError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ScaffoldError::Config(_) => 2,
            ScaffoldError::TargetNotEmpty(_) => 3,
            ScaffoldError::TemplateMissing(_) => 4,
            ScaffoldError::Overlay(OverlayError::Manifest { .. }) => 5,
            ScaffoldError::Overlay(_) => 1,
            ScaffoldError::PostProcess(_) => 1,
            ScaffoldError::Manifest(_) => 5,
            ScaffoldError::Io { .. } => 1,
        }
    }
}

/// Result type for scaffold operations
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ScaffoldError + '_ {
    move |source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// What a scaffold run did
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    /// Project root
    pub root: PathBuf,
    /// Whether an existing non-empty directory was emptied first
    pub emptied: bool,
    /// One report per applied template tree, in order
    pub overlays: Vec<OverlayReport>,
    /// Language conversion result, if it ran
    pub conversion: Option<ConversionReport>,
    /// Test directories removed, if pruning ran
    pub pruned: Vec<PathBuf>,
}

impl ScaffoldReport {
    /// Every deferred build-config side file across all overlays
    pub fn deferred(&self) -> impl Iterator<Item = &PathBuf> {
        self.overlays.iter().flat_map(|o| o.deferred.iter())
    }
}

/// Runs the scaffold pipeline against a file system
pub struct Scaffolder<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    options: &'a ScaffoldOptions,
}

impl<'a, F: FileSystem + ?Sized> Scaffolder<'a, F> {
    pub fn new(fs: &'a F, options: &'a ScaffoldOptions) -> Self {
        Self { fs, options }
    }

    /// Run every step
    pub fn run(&self) -> ScaffoldResult<ScaffoldReport> {
        let root = self.options.target_dir.clone();
        let templates = template_dirs(&self.options.template_root, &self.options.features);

        // 1. Validate templates before touching the target
        for template in &templates {
            if !self.fs.is_dir(template) {
                return Err(ScaffoldError::TemplateMissing(template.clone()));
            }
        }

        // 2. Prepare target
        let emptied = self.prepare_target(&root)?;
        info!(root = %root.display(), "scaffolding project");

        // 3. Initial manifest
        self.write_initial_manifest(&root)?;

        // 4. Overlays
        let overlay = Overlay::new(self.fs, &self.options.rules);
        let mut overlays = Vec::with_capacity(templates.len());
        for template in &templates {
            overlays.push(overlay.apply(template, &root)?);
        }

        // 5. Post-processing
        let conversion = if self.options.features.typescript {
            Some(LanguageConversion::typescript().run(self.fs, &root)?)
        } else {
            None
        };

        let pruned = if self.options.features.tests {
            Vec::new()
        } else {
            PruneRules::new()?.run(self.fs, &root)?
        };

        Ok(ScaffoldReport {
            root,
            emptied,
            overlays,
            conversion,
            pruned,
        })
    }

    /// Returns whether existing content was removed
    fn prepare_target(&self, root: &Path) -> ScaffoldResult<bool> {
        if can_safely_overwrite(self.fs, root).map_err(io_error(root))? {
            self.fs.create_dir_all(root).map_err(io_error(root))?;
            return Ok(false);
        }
        if !self.options.force {
            return Err(ScaffoldError::TargetNotEmpty(root.to_path_buf()));
        }
        info!(root = %root.display(), "emptying existing directory");
        empty_dir(self.fs, root).map_err(io_error(root))?;
        Ok(true)
    }

    fn write_initial_manifest(&self, root: &Path) -> ScaffoldResult<()> {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.options.package_name.clone()));
        map.insert("version".to_string(), Value::String(INITIAL_VERSION.to_string()));

        let path = root.join(&self.options.rules.manifest_file);
        let text = Manifest::from(map).to_pretty_string()?;
        self.fs.write(&path, text.as_bytes()).map_err(io_error(&path))
    }
}
