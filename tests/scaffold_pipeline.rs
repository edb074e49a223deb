//! End-to-end scaffold runs over the bundled templates
//!
//! These tests exercise the full pipeline on disk: template validation,
//! target preparation, overlays in plan order, and post-processing.

mod fixtures;

use std::fs;
use std::path::Path;

use create_userscript::config::{Features, Settings};
use create_userscript::template::{install_bundled, BUNDLED_FILES};
use create_userscript::{DiskFs, OverlayRules, ScaffoldError, ScaffoldOptions, Scaffolder};
use fixtures::{keys, read_json, relative_files, template_root, write_file};
use tempfile::TempDir;

fn options(target: &Path, features: Features) -> ScaffoldOptions {
    let settings = Settings {
        template_root: template_root(),
        features,
        overlay: OverlayRules::default(),
    };
    ScaffoldOptions::new(target.to_path_buf(), "My Script", settings)
}

fn all_features() -> Features {
    Features {
        typescript: true,
        linter: true,
        tests: true,
    }
}

#[test]
fn test_default_features() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("my-script");
    let options = options(&target, Features::default());

    let report = Scaffolder::new(&DiskFs, &options).run().unwrap();

    assert!(!report.emptied);
    assert_eq!(report.overlays.len(), 1);
    assert!(report.conversion.is_none());
    assert_eq!(report.pruned, vec![target.join("src/__tests__")]);
    assert_eq!(
        relative_files(&target),
        vec![
            ".gitignore",
            ".vscode/extensions.json",
            "package.json",
            "rollup.config.js",
            "src/greet.js",
            "src/jsconfig.json",
            "src/main.js",
        ]
    );

    let manifest = read_json(&target.join("package.json"));
    assert_eq!(manifest["name"], "my-script");
    assert_eq!(manifest["version"], "0.0.0");
    assert_eq!(keys(&manifest)[..2], ["name".to_string(), "version".to_string()]);
    assert!(manifest["devDependencies"]["rollup"].is_string());
}

#[test]
fn test_all_features() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("my-script");
    let options = options(&target, all_features());

    let report = Scaffolder::new(&DiskFs, &options).run().unwrap();

    assert_eq!(report.overlays.len(), 4);
    assert!(report.pruned.is_empty());
    assert_eq!(
        relative_files(&target),
        vec![
            ".eslintrc.cjs",
            ".gitignore",
            ".vscode/extensions.json",
            ".vscode/settings.json",
            "cypress/e2e/bundle.cy.js",
            "deferred-configs/linter.js",
            "deferred-configs/typescript.js",
            "package.json",
            "rollup.config.js",
            "src/__tests__/greet.spec.ts",
            "src/greet.ts",
            "src/main.ts",
            "src/tsconfig.json",
        ]
    );
    assert_eq!(report.deferred().count(), 2);

    let rollup = fs::read_to_string(target.join("rollup.config.js")).unwrap();
    assert!(rollup.contains("src/main.ts"));
    assert!(!rollup.contains("src/main.js"));

    let manifest = read_json(&target.join("package.json"));
    let dev = keys(&manifest["devDependencies"]);
    let mut sorted = dev.clone();
    sorted.sort();
    assert_eq!(dev, sorted);
    for dep in ["rollup", "eslint", "cypress", "typescript"] {
        assert!(dev.iter().any(|d| d == dep), "missing {}", dep);
    }
    assert!(manifest["scripts"]["lint"].is_string());
    assert!(manifest["scripts"]["test:e2e"].is_string());

    let extensions = read_json(&target.join(".vscode/extensions.json"));
    let recommendations = extensions["recommendations"].as_array().unwrap();
    let mut unique = recommendations.clone();
    unique.dedup();
    assert_eq!(recommendations.len(), unique.len());
}

#[test]
fn test_manifest_bytes_are_deterministic() {
    let run = || {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("app");
        let options = options(&target, all_features());
        Scaffolder::new(&DiskFs, &options).run().unwrap();
        fs::read(target.join("package.json")).unwrap()
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first.ends_with(b"}\n"));
}

#[test]
fn test_non_empty_target() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("existing");
    write_file(&target, "notes/keep.md", "keep");

    let err = Scaffolder::new(&DiskFs, &options(&target, Features::default()))
        .run()
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::TargetNotEmpty(_)));
    assert_eq!(err.exit_code(), 3);
    assert!(target.join("notes/keep.md").exists());

    let forced = options(&target, Features::default()).with_force(true);
    let report = Scaffolder::new(&DiskFs, &forced).run().unwrap();

    assert!(report.emptied);
    assert!(!target.join("notes").exists());
    assert!(target.join("package.json").exists());
}

#[test]
fn test_empty_existing_target_is_reused() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("empty");
    fs::create_dir_all(&target).unwrap();

    let report = Scaffolder::new(&DiskFs, &options(&target, Features::default()))
        .run()
        .unwrap();

    assert!(!report.emptied);
    assert!(target.join("src/main.js").exists());
}

#[test]
fn test_missing_template_root() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("app");
    let settings = Settings {
        template_root: dir.path().join("no-templates"),
        features: Features::default(),
        overlay: OverlayRules::default(),
    };
    let options = ScaffoldOptions::new(target.clone(), "app", settings);

    let err = Scaffolder::new(&DiskFs, &options).run().unwrap_err();

    assert!(matches!(err, ScaffoldError::TemplateMissing(_)));
    assert!(!target.exists());
}

#[test]
fn test_template_trees_are_not_modified() {
    let before = relative_files(&template_root());
    let dir = TempDir::new().unwrap();
    let options = options(&dir.path().join("app"), all_features());

    Scaffolder::new(&DiskFs, &options).run().unwrap();

    assert_eq!(relative_files(&template_root()), before);
}

#[test]
fn test_bundled_files_match_template_dir() {
    let mut bundled: Vec<String> = BUNDLED_FILES.iter().map(|(rel, _)| rel.to_string()).collect();
    bundled.sort();

    assert_eq!(bundled, relative_files(&template_root()));
    for (rel, contents) in BUNDLED_FILES {
        assert_eq!(fs::read(template_root().join(rel)).unwrap(), contents.to_vec(), "{}", rel);
    }
}

#[test]
fn test_scaffold_from_installed_bundle() {
    let dir = TempDir::new().unwrap();
    let installed = dir.path().join("installed");
    install_bundled(&DiskFs, &installed).unwrap();
    let settings = Settings {
        template_root: installed,
        features: all_features(),
        overlay: OverlayRules::default(),
    };
    let target = dir.path().join("app");
    let options = ScaffoldOptions::new(target.clone(), "app", settings);

    let report = Scaffolder::new(&DiskFs, &options).run().unwrap();

    assert_eq!(report.overlays.len(), 4);
    assert!(target.join("src/main.ts").exists());
    assert!(target.join("deferred-configs/linter.js").exists());
}
