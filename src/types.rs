//! Core types for the directory catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EntityId: literal on-disk sequence number for Repository, Collection and
/// FileGroup; truncated path digest for Directory and File nodes.
pub type EntityId = u64;

/// The five entity kinds of the fixed hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Repository,
    Collection,
    FileGroup,
    Directory,
    File,
}

impl EntityKind {
    /// First segment of the canonical path scheme.
    pub fn route_segment(self) -> &'static str {
        match self {
            EntityKind::Repository => "repositories",
            EntityKind::Collection => "collections",
            EntityKind::FileGroup => "file_groups",
            EntityKind::Directory => "cfs_directories",
            EntityKind::File => "cfs_files",
        }
    }

    /// Canonical path, e.g. `/collections/1`.
    pub fn canonical_path(self, id: EntityId) -> String {
        format!("/{}/{}", self.route_segment(), id)
    }

    /// Canonical path with the structured-format suffix, e.g. `/collections/1.json`.
    pub fn structured_path(self, id: EntityId) -> String {
        format!("{}.json", self.canonical_path(id))
    }

    /// True when the ID is a literal directory name rather than a digest.
    pub fn has_literal_id(self) -> bool {
        matches!(
            self,
            EntityKind::Repository | EntityKind::Collection | EntityKind::FileGroup
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Repository => "Repository",
            EntityKind::Collection => "Collection",
            EntityKind::FileGroup => "File group",
            EntityKind::Directory => "Directory",
            EntityKind::File => "File",
        };
        f.write_str(label)
    }
}
