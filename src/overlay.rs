//! Metadata overlay
//!
//! Repository, Collection and FileGroup directories may carry a sidecar
//! record of human-entered fields (title, description, storage level, ...).
//! The catalog only needs "mapping from string to value, given a directory";
//! a missing, unreadable or malformed sidecar is absent metadata, never an
//! error.

use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Overlay fields merged into an entity record.
pub type Metadata = serde_json::Map<String, Value>;

/// Source of sidecar metadata for entity directories.
pub trait MetadataOverlay: Send + Sync {
    /// Load the overlay for an entity directory; empty when absent.
    fn load(&self, dir: &Path) -> Metadata;
}

/// YAML sidecar file (`info.yml` by default) inside each entity directory.
#[derive(Debug, Clone)]
pub struct YamlSidecar {
    file_name: String,
}

impl YamlSidecar {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl Default for YamlSidecar {
    fn default() -> Self {
        Self::new("info.yml")
    }
}

impl MetadataOverlay for YamlSidecar {
    fn load(&self, dir: &Path) -> Metadata {
        let path = dir.join(&self.file_name);
        if !path.is_file() {
            return Metadata::new();
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => parse_sidecar(&text).unwrap_or_else(|| {
                warn!(path = %path.display(), "Ignoring malformed sidecar metadata");
                Metadata::new()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read sidecar metadata");
                Metadata::new()
            }
        }
    }
}

/// Parse sidecar text into overlay fields. `None` when the document is not a
/// YAML mapping. An empty document is an empty mapping.
pub fn parse_sidecar(text: &str) -> Option<Metadata> {
    let document: serde_yaml::Value = serde_yaml::from_str(text).ok()?;
    let mapping = match document {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => return Some(Metadata::new()),
        _ => return None,
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        match serde_json::to_value(&value) {
            Ok(value) => {
                metadata.insert(key, value);
            }
            Err(e) => warn!(key = %key, error = %e, "Dropping unrepresentable sidecar value"),
        }
    }
    Some(metadata)
}

/// Remove keys from an overlay (redaction, or keys that collide with derived fields).
pub fn strip_keys<S: AsRef<str>>(metadata: &mut Metadata, keys: &[S]) {
    for key in keys {
        metadata.remove(key.as_ref());
    }
}

/// Keep only the listed keys that are present.
pub fn select_keys(metadata: &Metadata, keys: &[&str]) -> Metadata {
    keys.iter()
        .filter_map(|key| metadata.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect()
}
