//! Filesystem walker
//!
//! Enumerates the content tree beneath the configured root. Fixed-depth
//! listings go through `glob` patterns; child listings and subtree scans go
//! through `walkdir`. Hidden entries are never enumerated and configured
//! housekeeping names are filtered out. Names that are not valid UTF-8 are
//! skipped everywhere. Entries come back sorted by name, but callers must not
//! rely on order for correctness.

use crate::layout::RelativePath;
use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One enumerated path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub relative: RelativePath,
    pub is_dir: bool,
}

impl WalkEntry {
    pub fn name(&self) -> &str {
        self.relative.name()
    }
}

/// Walker rooted at the content directory.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    ignored: HashSet<String>,
}

impl TreeWalker {
    pub fn new<I, S>(root: impl Into<PathBuf>, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            ignored: ignored.into_iter().map(Into::into).collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Anchored prefix trim; paths outside the root have no relative form.
    pub fn relative(&self, path: &Path) -> Option<RelativePath> {
        path.strip_prefix(&self.root)
            .ok()
            .and_then(RelativePath::from_relative)
    }

    pub fn absolute(&self, relative: &RelativePath) -> PathBuf {
        self.root.join(relative.pathname())
    }

    fn is_skipped(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignored.contains(name)
    }

    /// Enumerate paths matching a pattern relative to the root, e.g.
    /// `repositories/*/collections/*`.
    pub fn glob(&self, pattern: &str) -> Vec<WalkEntry> {
        let full = format!(
            "{}/{}",
            Pattern::escape(&self.root.to_string_lossy()),
            pattern
        );
        // Hidden names are dropped in `entry_for`, not by the matcher.
        let paths = match glob::glob(&full) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(pattern = %full, error = %e, "Invalid glob pattern");
                return Vec::new();
            }
        };
        paths
            .filter_map(|result| match result {
                Ok(path) => self.entry_for(path),
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable path");
                    None
                }
            })
            .collect()
    }

    /// Immediate children of a directory.
    pub fn children(&self, dir: &Path) -> Vec<WalkEntry> {
        self.walk(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|result| match result {
                Ok(entry) => self.entry_for(entry.into_path()),
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .collect()
    }

    /// The directory itself followed by every descendant, depth-first.
    pub fn descendants<'a>(&'a self, dir: &Path) -> impl Iterator<Item = WalkEntry> + 'a {
        self.walk(dir)
            .into_iter()
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                match entry.file_name().to_str() {
                    Some(name) => !self.is_skipped(name),
                    None => {
                        warn!(
                            path = %entry.path().display(),
                            "Skipping name that is not valid UTF-8"
                        );
                        false
                    }
                }
            })
            .filter_map(move |result| match result {
                Ok(entry) => self.entry_for(entry.into_path()),
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
    }

    /// Size from stat; content is never read. `None` once the file is gone.
    pub fn file_size(&self, path: &Path) -> Option<u64> {
        match std::fs::metadata(path) {
            Ok(metadata) => Some(metadata.len()),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "File vanished before stat");
                None
            }
        }
    }

    fn walk(&self, dir: &Path) -> WalkDir {
        WalkDir::new(dir).follow_links(true).sort_by_file_name()
    }

    fn entry_for(&self, path: PathBuf) -> Option<WalkEntry> {
        let relative = match path.strip_prefix(&self.root) {
            Ok(inside) => match RelativePath::from_relative(inside) {
                Some(relative) => relative,
                None => {
                    warn!(path = %path.display(), "Skipping name that is not valid UTF-8");
                    return None;
                }
            },
            Err(_) => return None,
        };
        // Wildcard segments may have matched a hidden directory on the way down.
        if relative.parts().iter().skip(1).any(|part| self.is_skipped(part)) {
            return None;
        }
        let metadata = std::fs::metadata(&path).ok()?;
        let is_dir = if metadata.is_dir() {
            true
        } else if metadata.is_file() {
            false
        } else {
            return None;
        };
        Some(WalkEntry {
            path,
            relative,
            is_dir,
        })
    }
}
