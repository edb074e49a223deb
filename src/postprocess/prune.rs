//! Removal of test artifact directories.
//!
//! Handles default test directory names and extra glob patterns.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};

use super::PostProcessError;
use crate::fs::FileSystem;
use crate::traverse::{empty_dir, pre_order, WalkControl};

/// Default directory names removed when tests are not wanted
const DEFAULT_TEST_DIRS: &[&str] = &["cypress", "__tests__"];

/// Directory-name patterns selecting directories to delete
#[derive(Debug)]
pub struct PruneRules {
    glob_set: GlobSet,
}

impl PruneRules {
    /// Create rules matching the default test directory names
    pub fn new() -> Result<Self, PostProcessError> {
        Self::with_patterns(&[])
    }

    /// Default names plus additional patterns
    pub fn with_patterns(patterns: &[&str]) -> Result<Self, PostProcessError> {
        let mut builder = GlobSetBuilder::new();

        for pattern in DEFAULT_TEST_DIRS {
            builder.add(Glob::new(pattern)?);
        }

        for pattern in patterns {
            if !pattern.is_empty() {
                builder.add(Glob::new(pattern)?);
            }
        }

        Ok(Self {
            glob_set: builder.build()?,
        })
    }

    /// Check whether a directory should be deleted, by its name
    pub fn is_pruned(&self, dir: &Path) -> bool {
        match dir.file_name() {
            Some(name) => self.glob_set.is_match(Path::new(name)),
            None => false,
        }
    }

    /// Delete every matching directory under `root`, not descending into them
    pub fn run<F: FileSystem + ?Sized>(&self, fs: &F, root: &Path) -> Result<Vec<PathBuf>, PostProcessError> {
        let mut removed = Vec::new();

        pre_order(
            fs,
            root,
            |dir| {
                if !self.is_pruned(dir) {
                    return Ok::<_, PostProcessError>(WalkControl::Continue);
                }
                debug!(dir = %dir.display(), "pruning");
                empty_dir(fs, dir)?;
                fs.remove_dir(dir)?;
                removed.push(dir.to_path_buf());
                Ok(WalkControl::SkipChildren)
            },
            |_| Ok(()),
        )?;

        info!(removed = removed.len(), "pruned test directories");
        Ok(removed)
    }
}
