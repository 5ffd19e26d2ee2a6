//! Recursive subtree assembly.

use super::{Catalog, ParentType, TreeNode};
use crate::error::CatalogError;
use crate::layout::RelativePath;
use crate::types::{EntityId, EntityKind};
use crate::walker::WalkEntry;
use std::path::Path;

impl Catalog {
    /// Full subtree beneath the directory with the given derived ID.
    pub fn directory_tree(&self, id: EntityId) -> Result<TreeNode, CatalogError> {
        let entry = self.find_node(EntityKind::Directory, id)?;
        Ok(self.tree_node(&entry))
    }

    /// Full subtree beneath a directory node given by absolute path.
    pub fn assemble_tree(&self, dir: &Path) -> Result<TreeNode, CatalogError> {
        let relative = self
            .walker
            .relative(dir)
            .filter(|relative| {
                dir.is_dir() && self.layout.classify(relative, true) == Some(EntityKind::Directory)
            })
            .ok_or_else(|| CatalogError::not_found(EntityKind::Directory, dir.display()))?;
        Ok(self.tree_node(&WalkEntry {
            path: dir.to_path_buf(),
            relative,
            is_dir: true,
        }))
    }

    // Recursion depth is bounded by the real tree; the filesystem is acyclic.
    fn tree_node(&self, entry: &WalkEntry) -> TreeNode {
        let (parent_id, parent_type) = self.tree_parent(&entry.relative);

        let mut files = Vec::new();
        let mut subdirectories = Vec::new();
        for child in self.walker.children(&entry.path) {
            match self.layout.classify(&child.relative, child.is_dir) {
                Some(EntityKind::Directory) => subdirectories.push(self.tree_node(&child)),
                Some(EntityKind::File) => files.extend(self.file_record(&child)),
                _ => {}
            }
        }

        TreeNode {
            id: entry.relative.id(),
            uuid: entry.relative.uuid(),
            name: entry.name().to_string(),
            parent_id,
            parent_type,
            files,
            subdirectories,
            relative_pathname: entry.relative.pathname().to_string(),
        }
    }

    fn tree_parent(&self, relative: &RelativePath) -> (EntityId, ParentType) {
        let parent = relative.parent().unwrap_or_else(|| relative.clone());
        match parent
            .literal_id()
            .filter(|_| self.layout.is_content_root(relative))
        {
            Some(file_group_id) => (file_group_id, ParentType::FileGroup),
            None => (parent.id(), ParentType::Directory),
        }
    }
}
