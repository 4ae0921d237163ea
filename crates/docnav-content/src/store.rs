//! Content store trait and error types.
//!
//! Provides the core [`ContentStore`] trait for looking up documents in named
//! collections, along with [`ContentError`] for unified error handling across
//! backends.
//!
//! # Id Convention
//!
//! All id parameters are **collection-relative document ids**, not file paths:
//! - `"index"` - collection home page
//! - `"guide"` - standalone page or directory index
//! - `"guide/setup"` - nested page
//!
//! Store implementations handle the mapping from ids to their internal format.

use async_trait::async_trait;

use crate::document::Document;
use crate::id::is_within;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// Collection or document does not exist.
    NotFound,
    /// Invalid document id.
    InvalidId,
    /// Underlying I/O failure.
    Io,
    /// Other/unknown error category.
    Other,
}

/// Content error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct ContentError {
    /// Semantic error category.
    pub kind: ContentErrorKind,
    /// Collection context (if applicable).
    pub collection: Option<String>,
    /// Document id context (if applicable).
    pub id: Option<String>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            collection: None,
            id: None,
            backend: None,
            source: None,
        }
    }

    /// Attach collection context.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Attach document id context.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create an error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ContentErrorKind::NotFound,
            _ => ContentErrorKind::Io,
        };
        Self::new(kind).with_source(err)
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (collection: docs, id: guide)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::InvalidId => "Invalid id",
            ContentErrorKind::Io => "I/O error",
            ContentErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        match (&self.collection, &self.id) {
            (Some(collection), Some(id)) => write!(f, " (collection: {collection}, id: {id})")?,
            (Some(collection), None) => write!(f, " (collection: {collection})")?,
            (None, Some(id)) => write!(f, " (id: {id})")?,
            (None, None) => {}
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Content collection accessor.
///
/// Provides a unified interface for looking up documents regardless of
/// backend. Lookups are asynchronous so that backends may suspend while
/// collection data is fetched.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Look up a single document by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(doc))` - Document exists
    /// - `Ok(None)` - No document with this id
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the backend fails (not for a missing document).
    async fn get_entry(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, ContentError>;

    /// Return all documents of a collection accepted by `filter`.
    ///
    /// Documents are returned in the store's iteration order. A missing
    /// collection yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the backend fails.
    async fn get_collection(
        &self,
        collection: &str,
        filter: &(dyn for<'d> Fn(&'d Document) -> bool + Send + Sync),
    ) -> Result<Vec<Document>, ContentError>;

    /// Return the documents of a collection that lie within `directory`.
    ///
    /// Equivalent to [`get_collection`](Self::get_collection) filtered with
    /// [`is_within`]. Backends that can prune by id before reading documents
    /// override it.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the backend fails.
    async fn get_directory(
        &self,
        collection: &str,
        directory: &str,
    ) -> Result<Vec<Document>, ContentError> {
        self.get_collection(collection, &|doc: &Document| is_within(&doc.id, directory))
            .await
    }
}
