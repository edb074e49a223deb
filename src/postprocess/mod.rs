//! Post-processing passes over a composed project tree
//!
//! Run after every template tree has been applied:
//! - [`LanguageConversion`] renames sources to another language's extension
//! - [`PruneRules`] deletes test artifact directories

mod language;
mod prune;

pub use language::{ConversionReport, LanguageConversion};
pub use prune::PruneRules;

use std::io;

/// Errors for post-processing passes
#[derive(Debug, thiserror::Error)]
pub enum PostProcessError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] globset::Error),
}
