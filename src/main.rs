//! create-userscript CLI
//!
//! Entry point for the `create-userscript` command-line tool.

use clap::Parser;
use create_userscript::config::{ConfigError, EffectiveConfig};
use create_userscript::package_name::is_valid_package_name;
use create_userscript::template::resolve_template_root;
use create_userscript::{DiskFs, PackageManager, ScaffoldError, ScaffoldOptions, Scaffolder};
use serde_json::{Map, Value};
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

const DEFAULT_PROJECT_NAME: &str = "my-userscript";

#[derive(Parser)]
#[command(name = "create-userscript")]
#[command(about = "Scaffold a userscript project", version)]
struct Cli {
    /// Project directory (default: my-userscript)
    dir: Option<String>,

    /// Add TypeScript
    #[arg(long, visible_alias = "ts")]
    typescript: bool,

    /// Add linter and formatter
    #[arg(long)]
    lint: bool,

    /// Keep unit and end-to-end tests
    #[arg(long, visible_aliases = ["with-tests", "cypress"])]
    tests: bool,

    /// Remove existing files in a non-empty target directory
    #[arg(long)]
    force: bool,

    /// Package name for package.json (default: derived from the directory)
    #[arg(long)]
    package_name: Option<String>,

    /// Directory holding the template trees (default: the bundled templates)
    #[arg(long)]
    template_root: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Log every file disposition to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    /// Only flags that were given override lower layers
    fn overrides(&self) -> Value {
        let mut features = Map::new();
        if self.typescript {
            features.insert("typescript".to_string(), Value::Bool(true));
        }
        if self.lint {
            features.insert("linter".to_string(), Value::Bool(true));
        }
        if self.tests {
            features.insert("tests".to_string(), Value::Bool(true));
        }

        let mut overrides = Map::new();
        overrides.insert("features".to_string(), Value::Object(features));
        if let Some(root) = &self.template_root {
            overrides.insert(
                "template_root".to_string(),
                Value::String(root.to_string_lossy().to_string()),
            );
        }
        Value::Object(overrides)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), ScaffoldError> {
    let cwd = env::current_dir().map_err(|source| ScaffoldError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    let effective = EffectiveConfig::build(cli.config.as_deref(), Some(cli.overrides()))?;
    let mut settings = effective.settings()?;
    let fallback = env::temp_dir().join(concat!("create-userscript-", env!("CARGO_PKG_VERSION")));
    settings.template_root = resolve_template_root(&DiskFs, &settings.template_root, &fallback)
        .map_err(|source| ScaffoldError::Io {
            path: fallback.clone(),
            source,
        })?;

    let dir = cli.dir.clone().unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
    let target = cwd.join(dir.trim());
    let project_name = project_name_for(&target, &dir);

    let mut options = ScaffoldOptions::new(target, &project_name, settings).with_force(cli.force);
    if let Some(name) = cli.package_name {
        if !is_valid_package_name(&name) {
            return Err(ConfigError::ValidationError(format!("invalid package.json name: {}", name)).into());
        }
        options = options.with_package_name(name);
    }

    println!("\nScaffolding project in {}...", options.target_dir.display());
    let report = Scaffolder::new(&DiskFs, &options).run()?;

    let deferred: Vec<_> = report.deferred().collect();
    if !deferred.is_empty() {
        println!("\nBuild configs set aside for manual merging:");
        for path in deferred {
            println!("  {}", relative_to(&report.root, path).display());
        }
    }

    let package_manager = PackageManager::detect(env::var("npm_execpath").ok().as_deref());

    println!("\nDone. Now run:\n");
    if report.root != cwd {
        println!("  cd {}", relative_to(&cwd, &report.root).display());
    }
    println!("  {}", package_manager.command("install"));
    println!("  {}", package_manager.command("dev"));
    println!();

    Ok(())
}

/// `.` scaffolds into the current directory, named after it
fn project_name_for(target: &Path, dir: &str) -> String {
    let trimmed = dir.trim();
    if trimmed == "." || trimmed.is_empty() {
        return target
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
    }
    Path::new(trimmed)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

fn relative_to<'a>(base: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}
