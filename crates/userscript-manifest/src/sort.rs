//! Canonical ordering of dependency sections.

use serde_json::{Map, Value};

/// Manifest sections whose keys are package names.
pub const DEPENDENCY_SECTIONS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Sort the keys of every dependency section in ascending byte order.
///
/// Sections keep their position in the manifest; every other field is left
/// untouched. Non-object sections and non-object manifests pass through.
pub fn sort_dependencies(manifest: Value) -> Value {
    let Value::Object(mut map) = manifest else {
        return manifest;
    };

    for section in DEPENDENCY_SECTIONS {
        if let Some(Value::Object(deps)) = map.get_mut(*section) {
            let mut entries: Vec<(String, Value)> = std::mem::take(deps).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            *deps = entries.into_iter().collect::<Map<String, Value>>();
        }
    }

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_sorts_each_section() {
        let manifest = json!({
            "dependencies": {"vue": "^3", "axios": "^1"},
            "devDependencies": {"rollup": "^2", "eslint": "^8", "cypress": "^9"},
            "peerDependencies": {"b": "1", "a": "1"},
            "optionalDependencies": {"z": "1", "y": "1"}
        });
        let sorted = sort_dependencies(manifest);

        assert_eq!(keys(&sorted["dependencies"]), vec!["axios", "vue"]);
        assert_eq!(keys(&sorted["devDependencies"]), vec!["cypress", "eslint", "rollup"]);
        assert_eq!(keys(&sorted["peerDependencies"]), vec!["a", "b"]);
        assert_eq!(keys(&sorted["optionalDependencies"]), vec!["y", "z"]);
    }

    #[test]
    fn test_case_sensitive_order() {
        let manifest = json!({"dependencies": {"b": "1", "B": "1", "a": "1", "@scope/x": "1"}});
        let sorted = sort_dependencies(manifest);

        assert_eq!(keys(&sorted["dependencies"]), vec!["@scope/x", "B", "a", "b"]);
    }

    #[test]
    fn test_other_fields_untouched() {
        let manifest = json!({
            "name": "x",
            "scripts": {"z": "1", "a": "2"},
            "dependencies": {"b": "1", "a": "1"},
            "version": "0.0.0"
        });
        let sorted = sort_dependencies(manifest);

        assert_eq!(keys(&sorted), vec!["name", "scripts", "dependencies", "version"]);
        assert_eq!(keys(&sorted["scripts"]), vec!["z", "a"]);
        assert_eq!(sorted["dependencies"]["a"], "1");
    }

    #[test]
    fn test_idempotent() {
        let manifest = json!({"devDependencies": {"c": "1", "a": "2", "b": "3"}});
        let once = sort_dependencies(manifest);
        let twice = sort_dependencies(once.clone());

        assert_eq!(keys(&once["devDependencies"]), keys(&twice["devDependencies"]));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_object_section_passes_through() {
        let manifest = json!({"dependencies": "none"});
        assert_eq!(sort_dependencies(manifest.clone()), manifest);
        assert_eq!(sort_dependencies(json!([1, 2])), json!([1, 2]));
    }
}
