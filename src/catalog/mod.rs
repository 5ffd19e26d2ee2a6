//! Entity resolution
//!
//! The catalog projects the content tree as a fixed-schema entity graph. It
//! holds no state beyond its configuration: every lookup re-scans the
//! filesystem, matches by derived or literal ID, merges sidecar metadata and
//! assembles a fresh record. Concurrent callers need no coordination.
//!
//! Lookups are exhaustive linear scans over the pattern for the requested
//! kind. A path that disappears between two calls simply stops resolving.

mod collection;
mod file_group;
mod node;
pub mod records;
mod repository;
mod tree;
mod uuid_router;

use crate::config::{CatalogConfig, ContentConfig, RepositoryConfig};
use crate::error::CatalogError;
use crate::layout::{Layout, RelativePath};
use crate::overlay::{self, Metadata, MetadataOverlay, YamlSidecar};
use crate::types::{EntityId, EntityKind};
use crate::walker::{TreeWalker, WalkEntry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub use records::*;

const REPOSITORY_PATTERN: &str = "repositories/*";
const COLLECTION_PATTERN: &str = "repositories/*/collections/*";
const FILE_GROUP_PATTERN: &str = "repositories/*/collections/*/file_groups/*";

/// Stateless resolver over one content root.
pub struct Catalog {
    walker: TreeWalker,
    layout: Layout,
    overlay: Arc<dyn MetadataOverlay>,
    on_disk_storage_level: String,
    list_hidden_keys: Vec<String>,
    detail_hidden_keys: Vec<String>,
}

impl Catalog {
    /// Catalog over `root` with default layout, sidecar and redaction settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let content = ContentConfig {
            root: root.into(),
            ..ContentConfig::default()
        };
        Self::with_settings(&content, &RepositoryConfig::default())
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::with_settings(&config.content, &config.repository)
    }

    fn with_settings(content: &ContentConfig, repository: &RepositoryConfig) -> Self {
        Self {
            walker: TreeWalker::new(content.root.clone(), content.ignored_files.clone()),
            layout: Layout::new(
                content.root_directory_name.clone(),
                content.ignored_files.clone(),
            ),
            overlay: Arc::new(YamlSidecar::new(content.sidecar_file.clone())),
            on_disk_storage_level: content.on_disk_storage_level.clone(),
            list_hidden_keys: repository.list_hidden_keys.clone(),
            detail_hidden_keys: repository.detail_hidden_keys.clone(),
        }
    }

    /// Replace the sidecar source.
    pub fn with_overlay(mut self, overlay: Arc<dyn MetadataOverlay>) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    /// Entities of one literal-ID kind matching a fixed-depth pattern.
    fn literal_entities<'a>(
        &'a self,
        pattern: &str,
        kind: EntityKind,
    ) -> impl Iterator<Item = (EntityId, WalkEntry)> + 'a {
        self.walker
            .glob(pattern)
            .into_iter()
            .filter(move |entry| self.layout.classify(&entry.relative, entry.is_dir) == Some(kind))
            .filter_map(|entry| entry.relative.literal_id().map(|id| (id, entry)))
    }

    fn find_literal(
        &self,
        pattern: &str,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<WalkEntry, CatalogError> {
        debug!(kind = %kind, id, "Scanning for entity");
        self.literal_entities(pattern, kind)
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, entry)| entry)
            .ok_or_else(|| CatalogError::not_found(kind, id))
    }

    /// Every Directory and File node beneath every FileGroup root, roots included.
    fn content_nodes(&self) -> impl Iterator<Item = (EntityKind, WalkEntry)> + '_ {
        self.literal_entities(FILE_GROUP_PATTERN, EntityKind::FileGroup)
            .flat_map(move |(_, file_group)| {
                let content_root = self
                    .walker
                    .absolute(&self.layout.content_root_of(&file_group.relative));
                self.walker.descendants(&content_root)
            })
            .filter_map(move |entry| {
                self.layout
                    .classify(&entry.relative, entry.is_dir)
                    .map(|kind| (kind, entry))
            })
    }

    /// Scan content nodes for a hash-derived ID.
    fn find_node(&self, kind: EntityKind, id: EntityId) -> Result<WalkEntry, CatalogError> {
        debug!(kind = %kind, id, "Scanning content nodes");
        self.content_nodes()
            .find(|(candidate_kind, entry)| *candidate_kind == kind && entry.relative.id() == id)
            .map(|(_, entry)| entry)
            .ok_or_else(|| CatalogError::not_found(kind, id))
    }

    /// Sidecar metadata with keys that would collide with derived fields removed.
    fn load_overlay(&self, dir: &Path, derived_keys: &[&str]) -> Metadata {
        let mut metadata = self.overlay.load(dir);
        overlay::strip_keys(&mut metadata, derived_keys);
        metadata
    }

    fn directory_ref(&self, relative: &RelativePath, structured: bool) -> NodeRef {
        let id = relative.id();
        NodeRef {
            id,
            name: relative.name().to_string(),
            path: if structured {
                EntityKind::Directory.structured_path(id)
            } else {
                EntityKind::Directory.canonical_path(id)
            },
            uuid: relative.uuid(),
        }
    }

    /// `None` when the file disappeared after it was enumerated.
    fn file_record(&self, entry: &WalkEntry) -> Option<FileRecord> {
        let size = self.walker.file_size(&entry.path)?;
        Some(FileRecord {
            id: entry.relative.id(),
            name: entry.name().to_string(),
            md5_sum: PLACEHOLDER_MD5.to_string(),
            uuid: entry.relative.uuid(),
            content_type: UNKNOWN_CONTENT_TYPE.to_string(),
            size,
            mtime: PLACEHOLDER_MTIME.to_string(),
            path: None,
            relative_pathname: entry.relative.pathname().to_string(),
            directory: None,
        })
    }
}
