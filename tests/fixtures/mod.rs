//! Test fixtures for overlay and scaffold integration tests
//!
//! This module provides:
//! - The bundled template trees shipped in `template/vanilla`
//! - Helpers for building throwaway template trees on disk

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Path to the bundled template root
pub fn template_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("template/vanilla")
}

/// Write `contents` to `root/rel`, creating parent directories
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Parse a JSON file
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Invalid JSON in {}: {}", path.display(), e))
}

/// Keys of a JSON object, in document order
pub fn keys(value: &serde_json::Value) -> Vec<String> {
    value
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

/// Every file under `root`, relative and sorted
pub fn relative_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_templates_exist() {
        let root = template_root();
        assert!(root.join("base/package.json").exists(), "Template root not found at {:?}", root);
        assert!(root.join("base/rollup.config.js").exists());
        assert!(root.join("config/linter").is_dir());
        assert!(root.join("config/cypress").is_dir());
        assert!(root.join("config/typescript").is_dir());
    }
}
