//! Ordered selection of template trees, and the trees bundled into the binary.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Features, BUNDLED_TEMPLATE_ROOT};
use crate::fs::FileSystem;

macro_rules! bundled {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_bytes!(concat!("../template/vanilla/", $path)) as &[u8])),*]
    };
}

/// Every file of `template/vanilla`, relative to the template root
pub const BUNDLED_FILES: &[(&str, &[u8])] = bundled![
    "base/.vscode/extensions.json",
    "base/_gitignore",
    "base/package.json",
    "base/rollup.config.js",
    "base/src/__tests__/greet.spec.js",
    "base/src/greet.js",
    "base/src/jsconfig.json",
    "base/src/main.js",
    "config/cypress/cypress/e2e/bundle.cy.js",
    "config/cypress/package.json",
    "config/linter/.vscode/extensions.json",
    "config/linter/_eslintrc.cjs",
    "config/linter/package.json",
    "config/linter/rollup.config.js",
    "config/typescript/.vscode/settings.json",
    "config/typescript/package.json",
    "config/typescript/rollup.config.js",
];

/// Tree applied first, always
pub const BASE_TEMPLATE: &str = "base";

/// Template trees for `features`, relative to the template root, in
/// application order. Later trees extend earlier ones.
pub fn template_plan(features: &Features) -> Vec<&'static str> {
    let mut plan = vec![BASE_TEMPLATE];
    if features.linter {
        plan.push("config/linter");
    }
    if features.tests {
        plan.push("config/cypress");
    }
    if features.typescript {
        plan.push("config/typescript");
    }
    plan
}

/// Absolute template directories for `features`
pub fn template_dirs(root: &Path, features: &Features) -> Vec<PathBuf> {
    template_plan(features)
        .into_iter()
        .map(|name| root.join(name))
        .collect()
}

/// Write the bundled trees under `dir`, overwriting what is there
pub fn install_bundled<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> io::Result<()> {
    for (rel, contents) in BUNDLED_FILES {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs.create_dir_all(parent)?;
        }
        fs.write(&path, contents)?;
    }
    Ok(())
}

/// Template root to scaffold from.
///
/// The default root points into the source checkout the binary was built
/// from. When that directory is gone (an installed binary), the bundled trees
/// are written to `fallback_dir` and that is used instead. Any other
/// configured root is returned unchanged.
pub fn resolve_template_root<F: FileSystem + ?Sized>(
    fs: &F,
    configured: &Path,
    fallback_dir: &Path,
) -> io::Result<PathBuf> {
    if configured != Path::new(BUNDLED_TEMPLATE_ROOT) || fs.is_dir(configured) {
        return Ok(configured.to_path_buf());
    }
    info!(dir = %fallback_dir.display(), "installing bundled templates");
    install_bundled(fs, fallback_dir)?;
    Ok(fallback_dir.to_path_buf())
}
