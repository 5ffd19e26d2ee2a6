//! Content layout
//!
//! The on-disk hierarchy is fixed:
//!
//! ```text
//! repositories/{rid}/collections/{cid}/file_groups/{fid}/root/...
//! ```
//!
//! Entity kind is a function of path depth beneath the content root. With
//! the relative path split on `/` (leading empty segment included), 3 parts
//! is a Repository, 5 a Collection, 7 a FileGroup, and anything at or below
//! the FileGroup's root directory is a Directory or File node.

use crate::identity::{derive_id, derive_uuid};
use crate::types::{EntityId, EntityKind};
use std::collections::HashSet;
use std::path::Path;

pub const REPOSITORIES: &str = "repositories";
pub const COLLECTIONS: &str = "collections";
pub const FILE_GROUPS: &str = "file_groups";

const REPOSITORY_PARTS: usize = 3;
const COLLECTION_PARTS: usize = 5;
const FILE_GROUP_PARTS: usize = 7;
const CONTENT_ROOT_PARTS: usize = 8;

/// Path relative to the content root.
///
/// Always starts with `/` and joins segments with `/`, regardless of the
/// host platform. This string is the sole input to identity derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Build from path components (already relative to the content root).
    /// `None` when any component is not valid UTF-8; such names have no
    /// stable identity and are never cataloged.
    pub fn from_relative(path: &Path) -> Option<Self> {
        let segments = path
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(name) => Some(name.to_str()),
                _ => None,
            })
            .collect::<Option<Vec<&str>>>()?;
        Some(Self::from_segments(segments))
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for segment in segments {
            joined.push('/');
            joined.push_str(segment.as_ref());
        }
        RelativePath(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative path without the leading `/`, as exposed in `relative_pathname`.
    pub fn pathname(&self) -> &str {
        self.0.strip_prefix('/').unwrap_or(&self.0)
    }

    /// Segments including the leading empty one, so `/repositories/1` has 3.
    pub fn parts(&self) -> Vec<&str> {
        self.0.split('/').collect()
    }

    pub fn depth(&self) -> usize {
        self.0.split('/').count()
    }

    /// Final segment.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    pub fn parent(&self) -> Option<RelativePath> {
        if self.0.is_empty() {
            return None;
        }
        self.0
            .rfind('/')
            .map(|idx| RelativePath(self.0[..idx].to_string()))
    }

    pub fn join(&self, segment: &str) -> RelativePath {
        RelativePath(format!("{}/{}", self.0, segment))
    }

    /// Final segment parsed as a literal sequence number.
    pub fn literal_id(&self) -> Option<EntityId> {
        parse_literal_id(self.name())
    }

    pub fn id(&self) -> EntityId {
        derive_id(&self.0)
    }

    pub fn uuid(&self) -> String {
        derive_uuid(&self.0)
    }
}

impl std::fmt::Display for RelativePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Literal IDs are plain decimal directory names in canonical form; anything
/// else (signs, leading zeros) is not an entity.
pub fn parse_literal_id(name: &str) -> Option<EntityId> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if name.len() > 1 && name.starts_with('0') {
        return None;
    }
    name.parse().ok()
}

/// Names and markers that shape the hierarchy.
#[derive(Debug, Clone)]
pub struct Layout {
    root_dir_name: String,
    ignored: HashSet<String>,
}

impl Layout {
    pub fn new<I, S>(root_dir_name: impl Into<String>, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root_dir_name: root_dir_name.into(),
            ignored: ignored.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    /// Determine the entity kind for a relative path, or `None` for paths that
    /// are part of the structure but not entities (sidecars, the
    /// `collections`/`file_groups` segment directories, stray files).
    pub fn classify(&self, relative: &RelativePath, is_dir: bool) -> Option<EntityKind> {
        let parts = relative.parts();
        let len = parts.len();
        if len < REPOSITORY_PARTS || !parts[0].is_empty() || parts[1] != REPOSITORIES {
            return None;
        }
        // Every segment that names an ancestor entity must be a literal ID.
        let entity_chain = |upto: usize| {
            let structure = [(3, COLLECTIONS), (5, FILE_GROUPS)];
            structure
                .iter()
                .filter(|(index, _)| *index < upto)
                .all(|(index, expected)| parts[*index] == *expected)
                && [2, 4, 6]
                    .iter()
                    .filter(|index| **index < upto)
                    .all(|index| parse_literal_id(parts[*index]).is_some())
        };
        match len {
            REPOSITORY_PARTS if is_dir && entity_chain(REPOSITORY_PARTS) => {
                Some(EntityKind::Repository)
            }
            COLLECTION_PARTS if is_dir && entity_chain(COLLECTION_PARTS) => {
                Some(EntityKind::Collection)
            }
            FILE_GROUP_PARTS if is_dir && entity_chain(FILE_GROUP_PARTS) => {
                Some(EntityKind::FileGroup)
            }
            n if n >= CONTENT_ROOT_PARTS
                && entity_chain(FILE_GROUP_PARTS)
                && parts[7] == self.root_dir_name =>
            {
                if is_dir {
                    Some(EntityKind::Directory)
                } else if self.is_ignored(relative.name()) {
                    None
                } else {
                    Some(EntityKind::File)
                }
            }
            _ => None,
        }
    }

    /// True when the path is a FileGroup's own root directory.
    pub fn is_content_root(&self, relative: &RelativePath) -> bool {
        let parts = relative.parts();
        parts.len() == CONTENT_ROOT_PARTS
            && parts[5] == FILE_GROUPS
            && parts[7] == self.root_dir_name
    }

    /// Relative path of a FileGroup's root directory.
    pub fn content_root_of(&self, file_group: &RelativePath) -> RelativePath {
        file_group.join(&self.root_dir_name)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("root", [".DS_Store", ".keep", "Thumbs.db"])
    }
}
