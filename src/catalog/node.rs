//! Directory and File node lookup.

use super::{Catalog, DirectoryRecord, DirectorySummary, FileRecord};
use crate::error::CatalogError;
use crate::types::{EntityId, EntityKind};

impl Catalog {
    /// One directory with its immediate children. A FileGroup's root
    /// directory has no `parent_directory`.
    pub fn directory(&self, id: EntityId) -> Result<DirectoryRecord, CatalogError> {
        let entry = self.find_node(EntityKind::Directory, id)?;

        let mut subdirectories = Vec::new();
        let mut files = Vec::new();
        for child in self.walker.children(&entry.path) {
            match self.layout.classify(&child.relative, child.is_dir) {
                Some(EntityKind::Directory) => {
                    let child_id = child.relative.id();
                    subdirectories.push(DirectorySummary {
                        id: child_id,
                        uuid: child.relative.uuid(),
                        name: child.name().to_string(),
                        path: EntityKind::Directory.structured_path(child_id),
                    });
                }
                Some(EntityKind::File) => {
                    if let Some(mut file) = self.file_record(&child) {
                        file.path = Some(EntityKind::File.structured_path(file.id));
                        files.push(file);
                    }
                }
                _ => {}
            }
        }

        let parent_directory = if self.layout.is_content_root(&entry.relative) {
            None
        } else {
            entry
                .relative
                .parent()
                .map(|parent| self.directory_ref(&parent, false))
        };

        Ok(DirectoryRecord {
            id,
            uuid: entry.relative.uuid(),
            name: entry.name().to_string(),
            relative_pathname: entry.relative.pathname().to_string(),
            subdirectories,
            files,
            parent_directory,
        })
    }

    /// One file with a reference to its containing directory.
    pub fn file(&self, id: EntityId) -> Result<FileRecord, CatalogError> {
        let entry = self.find_node(EntityKind::File, id)?;
        let mut record = self
            .file_record(&entry)
            .ok_or_else(|| CatalogError::not_found(EntityKind::File, id))?;
        record.directory = entry
            .relative
            .parent()
            .map(|parent| self.directory_ref(&parent, false));
        Ok(record)
    }
}
