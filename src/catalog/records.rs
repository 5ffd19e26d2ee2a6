//! Outward-facing entity records.
//!
//! Records are assembled fresh on every lookup and never mutated. Parent and
//! child links are plain `(id, name, path, uuid)` references, not live
//! pointers.

use crate::overlay::Metadata;
use crate::types::EntityId;
use serde::Serialize;
use serde_json::Value;

/// Content is never hashed.
pub const PLACEHOLDER_MD5: &str = "00000000000000000000000000000000";
/// No real mtime is read.
pub const PLACEHOLDER_MTIME: &str = "2020-01-01T10:05:30Z";
/// MIME types are never sniffed.
pub const UNKNOWN_CONTENT_TYPE: &str = "unknown/unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRecord {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub id: EntityId,
    pub uuid: String,
    /// Present on detail lookups only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<CollectionSummary>>,
}

impl RepositoryRecord {
    pub(crate) const DERIVED_KEYS: &'static [&'static str] = &["id", "uuid", "collections"];
}

/// Collection as listed inside a repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    pub id: EntityId,
    pub path: String,
}

/// Collection as listed by the top-level collection listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionListing {
    pub id: EntityId,
    pub uuid: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionRecord {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub id: EntityId,
    pub uuid: String,
    pub repository_path: String,
    pub repository_title: Value,
    pub repository_uuid: String,
    pub file_groups: Vec<FileGroupSummary>,
}

impl CollectionRecord {
    pub(crate) const DERIVED_KEYS: &'static [&'static str] = &[
        "id",
        "uuid",
        "repository_path",
        "repository_title",
        "repository_uuid",
        "file_groups",
    ];
}

/// FileGroup as listed inside a collection: `title` and `storage_level` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileGroupSummary {
    #[serde(flatten)]
    pub fields: Metadata,
    pub id: EntityId,
    pub path: String,
}

impl FileGroupSummary {
    pub(crate) const SELECTED_KEYS: &'static [&'static str] = &["title", "storage_level"];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileGroupRecord {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub id: EntityId,
    pub uuid: String,
    pub collection_id: EntityId,
    /// Only for FileGroups whose content is mirrored on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfs_directory: Option<NodeRef>,
}

impl FileGroupRecord {
    pub(crate) const DERIVED_KEYS: &'static [&'static str] =
        &["id", "uuid", "collection_id", "cfs_directory"];

    pub fn storage_level(&self) -> Option<&str> {
        self.metadata.get("storage_level").and_then(Value::as_str)
    }
}

/// Compact reference to a Directory node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    pub id: EntityId,
    pub name: String,
    pub path: String,
    pub uuid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySummary {
    pub id: EntityId,
    pub uuid: String,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryRecord {
    pub id: EntityId,
    pub uuid: String,
    pub name: String,
    pub relative_pathname: String,
    pub subdirectories: Vec<DirectorySummary>,
    pub files: Vec<FileRecord>,
    /// Absent for a FileGroup's root directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_directory: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub id: EntityId,
    pub name: String,
    pub md5_sum: String,
    pub uuid: String,
    pub content_type: String,
    pub size: u64,
    pub mtime: String,
    /// Set when the file appears inside a directory listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub relative_pathname: String,
    /// Set on file detail lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<NodeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParentType {
    FileGroup,
    #[serde(rename = "CfsDirectory")]
    Directory,
}

/// Recursive directory structure returned by `show_tree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: EntityId,
    pub uuid: String,
    pub name: String,
    pub parent_id: EntityId,
    pub parent_type: ParentType,
    pub files: Vec<FileRecord>,
    pub subdirectories: Vec<TreeNode>,
    pub relative_pathname: String,
}

impl TreeNode {
    /// Directories beneath this node, at any depth.
    pub fn descendant_directory_count(&self) -> usize {
        self.subdirectories
            .iter()
            .map(|sub| 1 + sub.descendant_directory_count())
            .sum()
    }

    /// Files at this level and below.
    pub fn descendant_file_count(&self) -> usize {
        self.files.len()
            + self
                .subdirectories
                .iter()
                .map(TreeNode::descendant_file_count)
                .sum::<usize>()
    }
}
