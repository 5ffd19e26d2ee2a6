//! FileGroup lookup.

use super::{Catalog, FileGroupRecord, FILE_GROUP_PATTERN};
use crate::error::CatalogError;
use crate::types::{EntityId, EntityKind};
use serde_json::Value;

impl Catalog {
    /// One file group. Only file groups stored on disk carry a reference to
    /// their root directory.
    pub fn file_group(&self, id: EntityId) -> Result<FileGroupRecord, CatalogError> {
        let entry = self.find_literal(FILE_GROUP_PATTERN, EntityKind::FileGroup, id)?;
        let metadata = self.load_overlay(&entry.path, FileGroupRecord::DERIVED_KEYS);

        // repositories/{rid}/collections/{cid}/file_groups/{fid}
        let collection_id = entry
            .relative
            .parent()
            .and_then(|segment| segment.parent())
            .and_then(|collection| collection.literal_id())
            .ok_or_else(|| CatalogError::not_found(EntityKind::FileGroup, id))?;

        let on_disk = metadata.get("storage_level").and_then(Value::as_str)
            == Some(self.on_disk_storage_level.as_str());
        let cfs_directory = on_disk.then(|| {
            let content_root = self.layout.content_root_of(&entry.relative);
            self.directory_ref(&content_root, true)
        });

        Ok(FileGroupRecord {
            metadata,
            id,
            uuid: entry.relative.uuid(),
            collection_id,
            cfs_directory,
        })
    }
}
