//! Document discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the building
//! phase (reading frontmatter). The Scanner only identifies files that could
//! form documents, returning lightweight references for `FsStore` to process.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::{file_path_to_id, is_content_file};

/// Reference to a document's source file.
///
/// Contains only the file location - no content is read at this stage.
#[derive(Debug, Clone)]
pub(crate) struct DocumentRef {
    /// Document id (e.g., "index", "guide", "guide/setup").
    pub id: String,
    /// Path to the content file.
    pub path: PathBuf,
}

/// Discovers document references in one collection directory.
pub(crate) struct Scanner {
    collection_dir: PathBuf,
}

impl Scanner {
    /// Create a new Scanner rooted at a collection directory.
    pub fn new(collection_dir: PathBuf) -> Self {
        Self { collection_dir }
    }

    /// Scan the collection and return document references.
    ///
    /// Entries are visited in sorted order so results are deterministic.
    /// When two files produce the same id (`guide/index.md` and `guide.md`),
    /// the first one visited wins. Returns an empty Vec if the directory
    /// doesn't exist.
    pub fn scan(&self) -> Vec<DocumentRef> {
        let mut refs = Vec::new();
        if self.collection_dir.is_dir() {
            self.scan_directory(&self.collection_dir, &mut refs);
        }

        let mut seen = HashSet::new();
        refs.retain(|r| {
            let fresh = seen.insert(r.id.clone());
            if !fresh {
                tracing::warn!(
                    id = %r.id,
                    path = %r.path.display(),
                    "Duplicate document id, skipping"
                );
            }
            fresh
        });
        refs
    }

    fn scan_directory(&self, dir_path: &Path, refs: &mut Vec<DocumentRef>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            return;
        };

        // Collect entries with cached file_type to avoid repeated stat calls
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e.path(), is_dir)
            })
            .collect();
        entries.sort();

        for (path, is_dir) in entries {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            // Skip hidden and partial files/dirs
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            if is_dir {
                self.scan_directory(&path, refs);
            } else if is_content_file(&path) {
                let Ok(rel_path) = path.strip_prefix(&self.collection_dir) else {
                    continue;
                };
                if let Some(id) = file_path_to_id(rel_path) {
                    refs.push(DocumentRef { id, path });
                }
            }
        }
    }
}
