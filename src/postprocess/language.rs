//! JavaScript to TypeScript conversion of a composed project.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::PostProcessError;
use crate::fs::FileSystem;
use crate::traverse::{pre_order, WalkControl};

/// Renames source files to another language's extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConversion {
    /// Directory (relative to the project root) whose files are renamed
    pub source_dir: String,
    /// Extension marking a convertible file, without the dot
    pub from_extension: String,
    /// Replacement extension, without the dot
    pub to_extension: String,
    /// Whole-file-name renames for config variants
    pub config_renames: Vec<(String, String)>,
    /// Config file (relative to the project root) whose entry reference is rewritten
    pub entry_config: String,
    /// Entry reference before conversion
    pub entry_from: String,
    /// Entry reference after conversion
    pub entry_to: String,
}

impl LanguageConversion {
    /// JavaScript sources under `src/` become TypeScript
    pub fn typescript() -> Self {
        Self {
            source_dir: "src".to_string(),
            from_extension: "js".to_string(),
            to_extension: "ts".to_string(),
            config_renames: vec![("jsconfig.json".to_string(), "tsconfig.json".to_string())],
            entry_config: "rollup.config.js".to_string(),
            entry_from: "main.js".to_string(),
            entry_to: "main.ts".to_string(),
        }
    }

    /// Run the pass over the project at `root`
    pub fn run<F: FileSystem + ?Sized>(&self, fs: &F, root: &Path) -> Result<ConversionReport, PostProcessError> {
        let mut report = ConversionReport::default();

        let entry_config = root.join(&self.entry_config);
        if fs.exists(&entry_config) {
            let bytes = fs.read(&entry_config)?;
            if let Some(rewritten) = replace_bytes(&bytes, self.entry_from.as_bytes(), self.entry_to.as_bytes()) {
                fs.write(&entry_config, &rewritten)?;
                report.rewritten = Some(entry_config);
            }
        }

        let source_dir = root.join(&self.source_dir);
        if fs.is_dir(&source_dir) {
            pre_order(
                fs,
                &source_dir,
                |_| Ok::<_, PostProcessError>(WalkControl::Continue),
                |path| {
                    if let Some(target) = self.target_for(path) {
                        debug!(from = %path.display(), to = %target.display(), "renaming");
                        fs.rename(path, &target)?;
                        report.renamed.push((path.to_path_buf(), target));
                    }
                    Ok(())
                },
            )?;
        }

        info!(
            renamed = report.renamed.len(),
            rewritten = report.rewritten.is_some(),
            "language conversion complete"
        );
        Ok(report)
    }

    /// New path for a convertible file, `None` if the file stays
    pub fn target_for(&self, path: &Path) -> Option<PathBuf> {
        let file_name = path.file_name()?.to_str()?;

        if let Some((_, to)) = self.config_renames.iter().find(|(from, _)| from == file_name) {
            return Some(path.with_file_name(to));
        }

        let suffix = format!(".{}", self.from_extension);
        let stem = file_name.strip_suffix(&suffix)?;
        if stem.is_empty() {
            return None;
        }
        Some(path.with_file_name(format!("{}.{}", stem, self.to_extension)))
    }
}

/// Replace every occurrence of `from`, leaving all other bytes as they are.
/// `None` if nothing matched.
fn replace_bytes(haystack: &[u8], from: &[u8], to: &[u8]) -> Option<Vec<u8>> {
    if from.is_empty() {
        return None;
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    let mut replaced = false;
    while let Some(pos) = rest.windows(from.len()).position(|window| window == from) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(to);
        rest = &rest[pos + from.len()..];
        replaced = true;
    }

    if !replaced {
        return None;
    }
    out.extend_from_slice(rest);
    Some(out)
}

/// What the conversion pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// (old, new) paths
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Config file whose entry reference was rewritten
    pub rewritten: Option<PathBuf>,
}
