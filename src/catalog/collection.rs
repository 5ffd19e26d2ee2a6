//! Collection listing and lookup.

use super::{
    Catalog, CollectionListing, CollectionRecord, FileGroupSummary, COLLECTION_PATTERN,
};
use crate::error::CatalogError;
use crate::layout::FILE_GROUPS;
use crate::overlay;
use crate::types::{EntityId, EntityKind};
use serde_json::Value;

impl Catalog {
    /// Every collection under every repository.
    pub fn collections(&self) -> Vec<CollectionListing> {
        self.literal_entities(COLLECTION_PATTERN, EntityKind::Collection)
            .map(|(id, entry)| CollectionListing {
                id,
                uuid: entry.relative.uuid(),
                path: EntityKind::Collection.canonical_path(id),
            })
            .collect()
    }

    /// One collection with its parent repository and file group summaries.
    pub fn collection(&self, id: EntityId) -> Result<CollectionRecord, CatalogError> {
        let entry = self.find_literal(COLLECTION_PATTERN, EntityKind::Collection, id)?;
        let metadata = self.load_overlay(&entry.path, CollectionRecord::DERIVED_KEYS);

        // repositories/{rid}/collections/{cid}
        let repository = entry
            .relative
            .parent()
            .and_then(|segment| segment.parent())
            .ok_or_else(|| CatalogError::not_found(EntityKind::Collection, id))?;
        let repository_id = repository
            .literal_id()
            .ok_or_else(|| CatalogError::not_found(EntityKind::Collection, id))?;
        let repository_title = self
            .overlay
            .load(&self.walker.absolute(&repository))
            .remove("title")
            .unwrap_or(Value::Null);

        let pattern = format!("{}/{}/*", entry.relative.pathname(), FILE_GROUPS);
        let file_groups = self
            .literal_entities(&pattern, EntityKind::FileGroup)
            .map(|(file_group_id, file_group)| FileGroupSummary {
                fields: overlay::select_keys(
                    &self.overlay.load(&file_group.path),
                    FileGroupSummary::SELECTED_KEYS,
                ),
                id: file_group_id,
                path: EntityKind::FileGroup.structured_path(file_group_id),
            })
            .collect();

        Ok(CollectionRecord {
            metadata,
            id,
            uuid: entry.relative.uuid(),
            repository_path: EntityKind::Repository.canonical_path(repository_id),
            repository_title,
            repository_uuid: repository.uuid(),
            file_groups,
        })
    }
}
