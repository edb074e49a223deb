//! Package manifest documents and their structural merge.
//!
//! A manifest is a JSON object whose key order is significant for output.
//! Two manifests are combined with [`deep_merge`] and canonicalized with
//! [`sort_dependencies`] so repeated scaffolds produce identical bytes.

mod merge;
mod sort;

pub use merge::{deep_merge, merge_layers};
pub use sort::{sort_dependencies, DEPENDENCY_SECTIONS};

use serde_json::{Map, Value};

/// Errors for manifest parsing
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },
}

/// A structured JSON configuration document with an object at the top level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    /// Parse manifest bytes. The top level must be an object.
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ManifestError::NotAnObject {
                found: kind_name(&other),
            }),
        }
    }

    /// Deep merge `incoming` onto this manifest
    pub fn merge(self, incoming: Manifest) -> Manifest {
        match deep_merge(Value::Object(self.0), Value::Object(incoming.0)) {
            Value::Object(map) => Self(map),
            // deep_merge of two objects is always an object
            _ => Self::default(),
        }
    }

    /// Sort every dependency section's keys
    pub fn sort_dependencies(self) -> Manifest {
        match sort_dependencies(Value::Object(self.0)) {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Serialize with 2-space indentation and a single trailing newline
    pub fn to_pretty_string(&self) -> Result<String, ManifestError> {
        let mut out = serde_json::to_string_pretty(&self.0)?;
        out.push('\n');
        Ok(out)
    }

    /// Get a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
