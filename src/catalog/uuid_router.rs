//! Reverse lookup from UUID to canonical path.

use super::Catalog;
use crate::error::CatalogError;
use crate::layout::{RelativePath, REPOSITORIES};
use crate::types::EntityKind;
use tracing::debug;

impl Catalog {
    /// Canonical path of the entity whose derived UUID matches.
    ///
    /// Scans every depth in one pass, Repository down to File. Should two
    /// paths ever share a UUID, the first in scan order wins.
    pub fn path_for_uuid(&self, uuid: &str) -> Result<String, CatalogError> {
        let repositories = self
            .walker
            .absolute(&RelativePath::from_segments([REPOSITORIES]));
        self.walker
            .descendants(&repositories)
            .filter_map(|entry| {
                self.layout
                    .classify(&entry.relative, entry.is_dir)
                    .map(|kind| (kind, entry))
            })
            .find(|(_, entry)| entry.relative.uuid() == uuid)
            .and_then(|(kind, entry)| {
                debug!(uuid, kind = %kind, path = %entry.relative, "Resolved UUID");
                let id = if kind.has_literal_id() {
                    entry.relative.literal_id()?
                } else {
                    entry.relative.id()
                };
                Some(kind.canonical_path(id))
            })
            .ok_or_else(|| CatalogError::uuid_not_found(uuid))
    }
}
