//! Error types for catalog operations.

use crate::types::EntityKind;
use thiserror::Error;

/// Errors surfaced by the catalog and its boundary layers.
///
/// `NotFound` is the only error the resolution core produces; the other
/// variants belong to the boundary layers (configuration, logging, HTTP, CLI).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// `kind` is `None` for UUID lookups, which span every kind.
    #[error("{} not found: {}", subject(.kind), .key)]
    NotFound {
        kind: Option<EntityKind>,
        key: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn not_found(kind: EntityKind, key: impl ToString) -> Self {
        CatalogError::NotFound {
            kind: Some(kind),
            key: key.to_string(),
        }
    }

    pub fn uuid_not_found(uuid: &str) -> Self {
        CatalogError::NotFound {
            kind: None,
            key: uuid.to_string(),
        }
    }

    /// True for lookups that matched nothing; the boundary maps these to 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::ConfigError(err.to_string())
    }
}

fn subject(kind: &Option<EntityKind>) -> String {
    kind.map_or_else(|| "Entity".to_string(), |kind| kind.to_string())
}
