//! Mock content store for testing.
//!
//! Provides [`MockStore`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::document::Document;
use crate::store::{ContentError, ContentErrorKind, ContentStore};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock content store for testing.
///
/// Stores documents in memory, in insertion order. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use docnav_content::{ContentStore, MockStore};
///
/// let store = MockStore::new()
///     .with_document("docs", "guide", "User Guide")
///     .with_document("docs", "guide/setup", "Setup");
///
/// let doc = store.get_entry("docs", "guide").await?;
/// assert_eq!(store.lookups(), vec!["guide"]);
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    documents: Vec<(String, Document)>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    lookups: Mutex<Vec<String>>,
}

impl MockStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a titled document to a collection.
    #[must_use]
    pub fn with_document(
        self,
        collection: impl Into<String>,
        id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        self.with_entry(collection, Document::new(id, Some(title.into())))
    }

    /// Add a document without a title.
    #[must_use]
    pub fn with_untitled(self, collection: impl Into<String>, id: impl Into<String>) -> Self {
        self.with_entry(collection, Document::new(id, None))
    }

    /// Add a fully built document.
    #[must_use]
    pub fn with_entry(mut self, collection: impl Into<String>, document: Document) -> Self {
        self.documents.push((collection.into(), document));
        self
    }

    /// Make every lookup in a collection fail with a backend error.
    #[must_use]
    pub fn with_failure(mut self, collection: impl Into<String>) -> Self {
        self.failing.insert(collection.into());
        self
    }

    /// Delay every `get_entry` answer for an id.
    ///
    /// The lookup is recorded when it starts, before the delay.
    #[must_use]
    pub fn with_delay(mut self, id: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(id.into(), delay);
        self
    }

    /// Ids passed to [`ContentStore::get_entry`], in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    fn check(&self, collection: &str) -> Result<(), ContentError> {
        if self.failing.contains(collection) {
            return Err(ContentError::new(ContentErrorKind::Other)
                .with_backend(BACKEND)
                .with_collection(collection));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MockStore {
    async fn get_entry(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, ContentError> {
        self.lookups.lock().unwrap().push(id.to_owned());
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        self.check(collection)?;
        Ok(self
            .documents
            .iter()
            .find(|(c, doc)| c == collection && doc.id == id)
            .map(|(_, doc)| doc.clone()))
    }

    async fn get_collection(
        &self,
        collection: &str,
        filter: &(dyn for<'d> Fn(&'d Document) -> bool + Send + Sync),
    ) -> Result<Vec<Document>, ContentError> {
        self.check(collection)?;
        Ok(self
            .documents
            .iter()
            .filter(|(c, doc)| c == collection && filter(doc))
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_get_entry_found() {
        let store = MockStore::new().with_document("docs", "guide", "Guide");

        let doc = store.get_entry("docs", "guide").await.unwrap().unwrap();

        assert_eq!(doc.id, "guide");
        assert_eq!(doc.title.as_deref(), Some("Guide"));
    }

    #[tokio::test]
    async fn test_get_entry_other_collection() {
        let store = MockStore::new().with_document("blog", "guide", "Guide");

        assert!(store.get_entry("docs", "guide").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookups_recorded_in_order() {
        let store = MockStore::new();

        let _ = store.get_entry("docs", "b").await;
        let _ = store.get_entry("docs", "a").await;

        assert_eq!(store.lookups(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_delayed_lookup_answers_after_others() {
        let store = MockStore::new()
            .with_document("docs", "slow", "Slow")
            .with_document("docs", "fast", "Fast")
            .with_delay("slow", Duration::from_millis(50));
        let finished = Mutex::new(Vec::new());

        let track = |id: &'static str| {
            let store = &store;
            let finished = &finished;
            async move {
                store.get_entry("docs", id).await.unwrap();
                finished.lock().unwrap().push(id);
            }
        };
        futures::join!(track("slow"), track("fast"));

        assert_eq!(store.lookups(), vec!["slow", "fast"]);
        assert_eq!(finished.into_inner().unwrap(), vec!["fast", "slow"]);
    }

    #[tokio::test]
    async fn test_get_directory_default() {
        let store = MockStore::new()
            .with_untitled("docs", "guides")
            .with_untitled("docs", "guides/a")
            .with_untitled("docs", "guidesextra")
            .with_untitled("docs", "api/b");

        let docs = store.get_directory("docs", "guides").await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["guides", "guides/a"]);
    }

    #[tokio::test]
    async fn test_get_collection_preserves_insertion_order() {
        let store = MockStore::new()
            .with_untitled("docs", "z")
            .with_untitled("docs", "a")
            .with_untitled("blog", "m")
            .with_untitled("docs", "k");

        let docs = store.get_collection("docs", &|_| true).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["z", "a", "k"]);
    }

    #[tokio::test]
    async fn test_get_collection_applies_filter() {
        let store = MockStore::new()
            .with_untitled("docs", "guides/a")
            .with_untitled("docs", "api/b");

        let docs = store
            .get_collection("docs", &|d| d.id.starts_with("guides"))
            .await
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "guides/a");
    }

    #[tokio::test]
    async fn test_failing_collection() {
        let store = MockStore::new()
            .with_untitled("docs", "guide")
            .with_failure("docs");

        let err = store.get_entry("docs", "guide").await.unwrap_err();
        assert_eq!(err.kind, ContentErrorKind::Other);
        assert_eq!(err.to_string(), "[Mock] Error (collection: docs)");

        assert!(store.get_collection("docs", &|_| true).await.is_err());
    }
}
