//! Repository listing and lookup.

use super::{Catalog, CollectionSummary, RepositoryRecord, REPOSITORY_PATTERN};
use crate::error::CatalogError;
use crate::layout::{RelativePath, COLLECTIONS, REPOSITORIES};
use crate::overlay;
use crate::types::{EntityId, EntityKind};
use tracing::debug;

impl Catalog {
    /// All repositories, without child summaries.
    pub fn repositories(&self) -> Vec<RepositoryRecord> {
        self.literal_entities(REPOSITORY_PATTERN, EntityKind::Repository)
            .map(|(id, entry)| {
                let mut metadata = self.load_overlay(&entry.path, RepositoryRecord::DERIVED_KEYS);
                overlay::strip_keys(&mut metadata, self.list_hidden_keys.as_slice());
                RepositoryRecord {
                    metadata,
                    id,
                    uuid: entry.relative.uuid(),
                    collections: None,
                }
            })
            .collect()
    }

    /// One repository with summaries of its collections.
    pub fn repository(&self, id: EntityId) -> Result<RepositoryRecord, CatalogError> {
        let relative = RelativePath::from_segments([REPOSITORIES, id.to_string().as_str()]);
        let path = self.walker.absolute(&relative);
        if !path.is_dir() {
            return Err(CatalogError::not_found(EntityKind::Repository, id));
        }
        debug!(id, path = %path.display(), "Resolved repository");

        let mut metadata = self.load_overlay(&path, RepositoryRecord::DERIVED_KEYS);
        overlay::strip_keys(&mut metadata, self.detail_hidden_keys.as_slice());

        let pattern = format!("{}/{}/*", relative.pathname(), COLLECTIONS);
        let collections = self
            .literal_entities(&pattern, EntityKind::Collection)
            .map(|(collection_id, entry)| CollectionSummary {
                title: self.overlay.load(&entry.path).remove("title"),
                id: collection_id,
                path: EntityKind::Collection.structured_path(collection_id),
            })
            .collect();

        Ok(RepositoryRecord {
            metadata,
            id,
            uuid: relative.uuid(),
            collections: Some(collections),
        })
    }
}
