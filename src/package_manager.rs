//! Package manager detection for the final instructions.

use std::fmt;

/// Supported package managers, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    Pnpm,
    Yarn,
    #[default]
    Npm,
}

impl PackageManager {
    /// Detect from the executable path of the invoking package manager
    /// (`npm_execpath`). Unknown or missing falls back to npm.
    pub fn detect(exec_path: Option<&str>) -> Self {
        match exec_path {
            Some(path) if path.contains("pnpm") => PackageManager::Pnpm,
            Some(path) if path.contains("yarn") => PackageManager::Yarn,
            _ => PackageManager::Npm,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Command line that runs `script` (or installs, for `install`)
    pub fn command(&self, script: &str) -> String {
        match (self, script) {
            (_, "install") => format!("{} install", self.as_str()),
            (PackageManager::Npm, _) => format!("npm run {}", script),
            _ => format!("{} {}", self.as_str(), script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
