//! Filesystem content collections for the docnav sidebar engine.
//!
//! This crate provides [`FsStore`], a filesystem-based implementation of the
//! [`ContentStore`](docnav_content::ContentStore) trait. It handles:
//!
//! - Recursive directory scanning for `.md` and `.mdx` documents
//! - Directory-index folding (`guide/index.md` becomes id `guide`)
//! - YAML frontmatter parsing into document metadata
//! - Title extraction from frontmatter or the first H1 heading
//!
//! Each subdirectory of the content root is one collection.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docnav_content::ContentStore;
//! use docnav_content_fs::FsStore;
//!
//! let store = FsStore::new(PathBuf::from("src/content"));
//! let guide = store.get_entry("docs", "guide").await?;
//! ```

mod frontmatter;
mod scanner;
mod source;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use docnav_content::{ContentError, ContentErrorKind, ContentStore, Document, is_within};
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;

use frontmatter::{parse_frontmatter, split_frontmatter};
use scanner::{DocumentRef, Scanner};
use source::CONTENT_EXTENSIONS;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem content store.
///
/// Collections are subdirectories of the content root. Documents are read
/// on every lookup, so edits are visible without reloading. File access runs
/// on the blocking thread pool, so lookups never stall the async runtime.
pub struct FsStore {
    inner: Arc<Collections>,
}

/// Synchronous filesystem access, shared with blocking tasks.
struct Collections {
    /// Root directory holding one subdirectory per collection.
    content_root: PathBuf,
    /// Regex for extracting first H1 heading.
    h1_regex: Regex,
}

impl FsStore {
    /// Create a new filesystem store.
    ///
    /// # Arguments
    ///
    /// * `content_root` - Directory containing collection directories
    ///
    /// # Panics
    ///
    /// Panics if the internal regex for H1 heading extraction fails to compile.
    /// This should never happen as the regex is a compile-time constant.
    #[must_use]
    pub fn new(content_root: PathBuf) -> Self {
        Self {
            inner: Arc::new(Collections {
                content_root,
                h1_regex: Regex::new(r"(?m)^#\s+(.+)$").unwrap(),
            }),
        }
    }

    /// Directory of a collection.
    #[must_use]
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.inner.collection_dir(collection)
    }

    /// Reject collection names and ids that could escape the content root.
    fn validate(collection: &str, id: &str) -> Result<(), ContentError> {
        let bad_segment = |s: &str| s == ".." || s.starts_with('.') || s.starts_with('_');
        if collection.is_empty() || collection.contains('/') || bad_segment(collection) {
            return Err(ContentError::new(ContentErrorKind::InvalidId)
                .with_backend(BACKEND)
                .with_collection(collection));
        }
        if id.contains('\\') || id.split('/').any(|s| s.is_empty() || bad_segment(s)) {
            return Err(ContentError::new(ContentErrorKind::InvalidId)
                .with_backend(BACKEND)
                .with_collection(collection)
                .with_id(id));
        }
        Ok(())
    }

    /// Run filesystem work on the blocking thread pool.
    async fn blocking<T, F>(&self, work: F) -> Result<T, ContentError>
    where
        F: FnOnce(&Collections) -> Result<T, ContentError> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || work(&inner))
            .await
            .map_err(|e| {
                ContentError::new(ContentErrorKind::Other)
                    .with_backend(BACKEND)
                    .with_source(e)
            })?
    }
}

impl Collections {
    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.content_root.join(collection)
    }

    /// Resolve a document id to its source file.
    ///
    /// For `"index"`: `index.md`, `index.mdx` at the collection root.
    ///
    /// For other ids, in scan precedence order:
    /// 1. `{id}/index.md`, `{id}/index.mdx`
    /// 2. `{id}.md`, `{id}.mdx`
    ///
    /// Ids ending in a nested `index` segment never resolve, because the scan
    /// folds those files into their directory id.
    fn resolve_source(&self, collection: &str, id: &str) -> Option<PathBuf> {
        let dir = self.collection_dir(collection);
        let candidates: Vec<PathBuf> = if id == "index" {
            CONTENT_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("index.{ext}")))
                .collect()
        } else if id.ends_with("/index") {
            Vec::new()
        } else {
            let base = dir.join(id);
            CONTENT_EXTENSIONS
                .iter()
                .map(|ext| base.join(format!("index.{ext}")))
                .chain(
                    CONTENT_EXTENSIONS
                        .iter()
                        .map(|ext| dir.join(format!("{id}.{ext}"))),
                )
                .collect()
        };

        candidates.into_iter().find(|p| p.is_file())
    }

    /// Look up one document.
    fn entry(&self, collection: &str, id: &str) -> Result<Option<Document>, ContentError> {
        match self.resolve_source(collection, id) {
            Some(path) => self.build_document(collection, id, &path).map(Some),
            None => Ok(None),
        }
    }

    /// Read a source file and build its `Document`.
    fn build_document(
        &self,
        collection: &str,
        id: &str,
        path: &Path,
    ) -> Result<Document, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ContentError::io(e)
                .with_backend(BACKEND)
                .with_collection(collection)
                .with_id(id)
        })?;

        let (yaml, body) = split_frontmatter(&content);
        let data = match yaml.map(parse_frontmatter) {
            Some(Ok(data)) => data,
            Some(Err(e)) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse frontmatter, ignoring"
                );
                serde_json::Map::new()
            }
            None => serde_json::Map::new(),
        };

        let title = data
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .or_else(|| self.extract_h1(body));

        Ok(Document {
            id: id.to_owned(),
            title,
            data,
        })
    }

    /// Extract title from first H1 heading.
    fn extract_h1(&self, body: &str) -> Option<String> {
        let caps = self.h1_regex.captures(body)?;
        Some(caps[1].trim().to_owned())
    }

    /// Scan a collection and build the documents whose id passes `keep`.
    ///
    /// Ids are checked before any file is read. Unreadable files are logged
    /// and skipped.
    fn scan_collection(&self, collection: &str, keep: impl Fn(&str) -> bool) -> Vec<Document> {
        let mut refs = Scanner::new(self.collection_dir(collection)).scan();
        let scanned = refs.len();
        refs.retain(|r| keep(&r.id));
        let documents: Vec<Document> = refs
            .par_iter()
            .filter_map(|DocumentRef { id, path }| {
                self.build_document(collection, id, path)
                    .inspect_err(|e| {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to read document, skipping"
                        );
                    })
                    .ok()
            })
            .collect();

        tracing::debug!(
            collection,
            scanned,
            document_count = documents.len(),
            "Collection scan completed"
        );
        documents
    }
}

#[async_trait]
impl ContentStore for FsStore {
    async fn get_entry(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, ContentError> {
        Self::validate(collection, id)?;
        let (collection, id) = (collection.to_owned(), id.to_owned());
        self.blocking(move |c| c.entry(&collection, &id)).await
    }

    async fn get_collection(
        &self,
        collection: &str,
        filter: &(dyn for<'d> Fn(&'d Document) -> bool + Send + Sync),
    ) -> Result<Vec<Document>, ContentError> {
        Self::validate(collection, "index")?;
        let collection = collection.to_owned();
        let mut documents = self
            .blocking(move |c| Ok(c.scan_collection(&collection, |_| true)))
            .await?;
        documents.retain(|doc| filter(doc));
        Ok(documents)
    }

    async fn get_directory(
        &self,
        collection: &str,
        directory: &str,
    ) -> Result<Vec<Document>, ContentError> {
        Self::validate(collection, "index")?;
        let (collection, directory) = (collection.to_owned(), directory.to_owned());
        self.blocking(move |c| {
            Ok(c.scan_collection(&collection, |id| is_within(id, &directory)))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_store_is_send_sync() {
        assert_send_sync::<FsStore>();
    }

    fn create_docs() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(docs.join("guide")).unwrap();
        fs::write(docs.join("index.md"), "---\ntitle: Welcome\n---\nHello").unwrap();
        fs::write(docs.join("guide/index.md"), "# Guide\n\nIntro.").unwrap();
        fs::write(
            docs.join("guide/setup.mdx"),
            "---\nsidebar:\n  label: Install\n---\n# Setup Steps\n",
        )
        .unwrap();
        fs::write(docs.join("plain.md"), "No heading here.").unwrap();
        temp_dir
    }

    #[tokio::test]
    async fn test_get_entry_root_index() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let doc = store.get_entry("docs", "index").await.unwrap().unwrap();

        assert_eq!(doc.id, "index");
        assert_eq!(doc.title.as_deref(), Some("Welcome"));
    }

    #[tokio::test]
    async fn test_get_entry_directory_index() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let doc = store.get_entry("docs", "guide").await.unwrap().unwrap();

        assert_eq!(doc.title.as_deref(), Some("Guide"));
    }

    #[tokio::test]
    async fn test_get_entry_frontmatter_data() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let doc = store.get_entry("docs", "guide/setup").await.unwrap().unwrap();

        assert_eq!(doc.title.as_deref(), Some("Setup Steps"));
        assert_eq!(doc.sidebar_label("en"), Some("Install"));
    }

    #[tokio::test]
    async fn test_get_entry_untitled() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let doc = store.get_entry("docs", "plain").await.unwrap().unwrap();

        assert!(doc.title.is_none());
    }

    #[tokio::test]
    async fn test_get_entry_missing() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        assert!(store.get_entry("docs", "nope").await.unwrap().is_none());
        assert!(store.get_entry("docs", "guide/index").await.unwrap().is_none());
        assert!(store.get_entry("blog", "index").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_entry_rejects_traversal() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let err = store.get_entry("docs", "../secrets").await.unwrap_err();
        assert_eq!(err.kind, ContentErrorKind::InvalidId);

        let err = store.get_entry("..", "index").await.unwrap_err();
        assert_eq!(err.kind, ContentErrorKind::InvalidId);
    }

    #[tokio::test]
    async fn test_get_collection_all() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let docs = store.get_collection("docs", &|_| true).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["guide", "guide/setup", "index", "plain"]);
    }

    #[tokio::test]
    async fn test_get_collection_filtered() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let docs = store
            .get_collection("docs", &|d| d.id.starts_with("guide"))
            .await
            .unwrap();

        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_get_directory_prunes_by_id() {
        let temp_dir = create_docs();
        let docs = temp_dir.path().join("docs");
        fs::write(docs.join("guidebook.md"), "# Guidebook").unwrap();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let found = store.get_directory("docs", "guide").await.unwrap();
        let ids: Vec<_> = found.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["guide", "guide/setup"]);
        assert_eq!(found[1].title.as_deref(), Some("Setup Steps"));
    }

    #[tokio::test]
    async fn test_get_directory_rejects_bad_collection() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let err = store.get_directory("../docs", "guide").await.unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::InvalidId);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_concurrent_lookups_on_single_thread_runtime() {
        let temp_dir = create_docs();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let (entry, listing) = tokio::join!(
            store.get_entry("docs", "guide"),
            store.get_directory("docs", ""),
        );

        assert_eq!(entry.unwrap().unwrap().id, "guide");
        assert_eq!(listing.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_get_collection_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let docs = store.get_collection("docs", &|_| true).await.unwrap();

        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_frontmatter_is_ignored() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("broken.md"), "---\ntitle: [oops\n---\n# Fallback\n").unwrap();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let doc = store.get_entry("docs", "broken").await.unwrap().unwrap();

        assert!(doc.data.is_empty());
        assert_eq!(doc.title.as_deref(), Some("Fallback"));
    }
}
