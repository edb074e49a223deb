//! Template overlay engine
//!
//! Composes one template tree onto the project tree:
//! - Directories are created (idempotent) and recursed into
//! - Each file gets a [`Disposition`] from its source name and whether the
//!   destination already exists
//! - Manifests and editor settings are deep-merged instead of overwritten
//! - A colliding build config is written to a side directory keyed by the
//!   template tree's name so later reconciliation can see every contribution
//! - Everything else is copied verbatim, overwriting silently
//!
//! Nothing is rolled back on failure: files written before an error stay.

mod disposition;
mod rules;

pub use disposition::{Disposition, FileFacts};
pub use rules::{OverlayRules, DEFAULT_DEFERRED_DIR};

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};
use userscript_manifest::{Manifest, ManifestError};

use crate::fs::FileSystem;

/// Errors for overlay operations
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Template source does not exist: {0}")]
    MissingSource(PathBuf),

    #[error("Cannot derive a template name from {0}")]
    UnnamedSource(PathBuf),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON document {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> OverlayError + '_ {
    move |source| OverlayError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Last named component of `source_root` after resolving `.` and `..`
/// lexically. `None` when nothing names the tree, e.g. `.` or `/`.
fn tree_name(source_root: &Path) -> Option<String> {
    let mut names = Vec::new();
    for component in source_root.components() {
        match component {
            Component::Normal(name) => names.push(name),
            Component::ParentDir => {
                names.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    names.last().map(|name| name.to_string_lossy().into_owned())
}

/// What one overlay call did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayReport {
    /// Name of the applied template tree
    pub tree: String,
    /// Directories ensured in the project tree
    pub directories: usize,
    /// Files copied verbatim
    pub copied: usize,
    /// Dotfiles copied under their renamed destination
    pub renamed: usize,
    /// Manifests merged into an existing manifest
    pub manifests_merged: usize,
    /// Settings files merged into existing settings
    pub settings_merged: usize,
    /// Side files written for colliding build configs
    pub deferred: Vec<PathBuf>,
}

impl OverlayReport {
    fn new(tree: String) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    /// Total number of files written
    pub fn files_written(&self) -> usize {
        self.copied + self.renamed + self.manifests_merged + self.settings_merged + self.deferred.len()
    }
}

/// Overlay engine bound to a file system and a set of filename conventions
pub struct Overlay<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    rules: &'a OverlayRules,
}

impl<'a, F: FileSystem + ?Sized> Overlay<'a, F> {
    pub fn new(fs: &'a F, rules: &'a OverlayRules) -> Self {
        Self { fs, rules }
    }

    /// Compose the tree at `source_root` onto `dest_root`.
    ///
    /// The source tree is never modified. The tree name used for deferred
    /// build configs is the last named component of `source_root` once `.`
    /// and `..` are resolved. A source root with no name is an error.
    pub fn apply(&self, source_root: &Path, dest_root: &Path) -> Result<OverlayReport, OverlayError> {
        if !self.fs.exists(source_root) {
            return Err(OverlayError::MissingSource(source_root.to_path_buf()));
        }

        let tree = tree_name(source_root)
            .ok_or_else(|| OverlayError::UnnamedSource(source_root.to_path_buf()))?;

        info!(tree = %tree, source = %source_root.display(), dest = %dest_root.display(), "applying template");

        let mut report = OverlayReport::new(tree);
        self.render(source_root, dest_root, &mut report)?;

        debug!(
            tree = %report.tree,
            files = report.files_written(),
            deferred = report.deferred.len(),
            "template applied"
        );
        Ok(report)
    }

    fn render(&self, src: &Path, dest: &Path, report: &mut OverlayReport) -> Result<(), OverlayError> {
        if self.fs.is_dir(src) {
            self.fs.create_dir_all(dest).map_err(io_error(dest))?;
            report.directories += 1;

            for child in self.fs.read_dir(src).map_err(io_error(src))? {
                let Some(name) = child.file_name() else {
                    continue;
                };
                let child_dest = dest.join(name);
                self.render(&child, &child_dest, report)?;
            }
            return Ok(());
        }

        self.render_file(src, dest, report)
    }

    fn render_file(&self, src: &Path, dest: &Path, report: &mut OverlayReport) -> Result<(), OverlayError> {
        let file_name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent_name = src
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned());

        let facts = FileFacts {
            file_name: &file_name,
            parent_name: parent_name.as_deref(),
            dest_exists: self.fs.exists(dest),
        };
        let disposition = Disposition::classify(self.rules, &facts);
        debug!(src = %src.display(), dest = %dest.display(), %disposition, "rendering file");

        match disposition {
            Disposition::MergeManifest => {
                let merged = self.merge_documents(dest, src)?.sort_dependencies();
                self.write_document(dest, &merged)?;
                report.manifests_merged += 1;
            }
            Disposition::DeferBuildConfig => {
                let side = self.deferred_path(dest, &file_name, &report.tree);
                if let Some(side_dir) = side.parent() {
                    self.fs.create_dir_all(side_dir).map_err(io_error(side_dir))?;
                }
                self.copy(src, &side)?;
                warn!(
                    existing = %dest.display(),
                    deferred = %side.display(),
                    "build config already present, deferring contribution"
                );
                report.deferred.push(side);
            }
            Disposition::MergeSettings => {
                let merged = self.merge_documents(dest, src)?;
                self.write_document(dest, &merged)?;
                report.settings_merged += 1;
            }
            Disposition::RenameDotfile => {
                let renamed = self
                    .rules
                    .dotfile_name(&file_name)
                    .map(|name| dest.with_file_name(name))
                    .unwrap_or_else(|| dest.to_path_buf());
                self.copy(src, &renamed)?;
                report.renamed += 1;
            }
            Disposition::Copy => {
                self.copy(src, dest)?;
                report.copied += 1;
            }
        }
        Ok(())
    }

    /// `<dest-dir>/<deferred_dir>/<tree>.<ext>`
    fn deferred_path(&self, dest: &Path, file_name: &str, tree: &str) -> PathBuf {
        let side_dir = dest
            .parent()
            .map(|p| p.join(&self.rules.deferred_dir))
            .unwrap_or_else(|| PathBuf::from(&self.rules.deferred_dir));
        let side_name = match Path::new(file_name).extension() {
            Some(ext) => format!("{}.{}", tree, ext.to_string_lossy()),
            None => tree.to_string(),
        };
        side_dir.join(side_name)
    }

    fn read_document(&self, path: &Path) -> Result<Manifest, OverlayError> {
        let bytes = self.fs.read(path).map_err(io_error(path))?;
        Manifest::parse(&bytes).map_err(|source| OverlayError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Existing document is the base, incoming is the overlay
    fn merge_documents(&self, existing: &Path, incoming: &Path) -> Result<Manifest, OverlayError> {
        let base = self.read_document(existing)?;
        let overlay = self.read_document(incoming)?;
        Ok(base.merge(overlay))
    }

    fn write_document(&self, path: &Path, document: &Manifest) -> Result<(), OverlayError> {
        let text = document.to_pretty_string().map_err(|source| OverlayError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        self.fs.write(path, text.as_bytes()).map_err(io_error(path))
    }

    fn copy(&self, src: &Path, dest: &Path) -> Result<(), OverlayError> {
        let bytes = self.fs.read(src).map_err(io_error(src))?;
        self.fs.write(dest, &bytes).map_err(io_error(dest))
    }
}
