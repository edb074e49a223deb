//! npm package name validation.

use std::sync::OnceLock;

use regex_lite::Regex;

const VALID_NAME: &str = r"^(?:@[a-z0-9*~-][a-z0-9*._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$";

fn valid_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VALID_NAME).unwrap())
}

/// Whether `name` can be used as-is in the manifest's `name` field
pub fn is_valid_package_name(name: &str) -> bool {
    valid_name().is_match(name)
}

/// Derive a valid package name from a project directory name
pub fn to_valid_package_name(project_name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static INVALID: OnceLock<Regex> = OnceLock::new();

    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let invalid = INVALID.get_or_init(|| Regex::new(r"[^a-z0-9~-]+").unwrap());

    let lowered = project_name.trim().to_lowercase();
    let dashed = whitespace.replace_all(&lowered, "-");
    let stripped = dashed
        .strip_prefix('.')
        .or_else(|| dashed.strip_prefix('_'))
        .unwrap_or(&dashed);
    invalid.replace_all(stripped, "-").into_owned()
}
