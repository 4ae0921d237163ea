//! Collection entry type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entry in a content collection.
///
/// # Id Convention
///
/// The `id` field is a collection-relative, slash-separated path:
/// - `"index"` - collection home page
/// - `"guide"` - standalone page or directory index
/// - `"guide/setup"` - nested page
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Collection-relative id (e.g., "index", "guide", "guide/setup").
    pub id: String,
    /// Display title from frontmatter or first heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Arbitrary frontmatter data.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl Document {
    /// Create a document with a title and no extra data.
    #[must_use]
    pub fn new(id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            title,
            data: Map::new(),
        }
    }

    /// Attach frontmatter data.
    #[must_use]
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// Sidebar label declared in frontmatter, if any.
    ///
    /// Looks up `sidebar.translations.<locale>` first, then `sidebar.label`.
    /// Empty strings count as absent.
    #[must_use]
    pub fn sidebar_label(&self, locale: &str) -> Option<&str> {
        let sidebar = self.data.get("sidebar")?;
        sidebar
            .get("translations")
            .and_then(|t| t.get(locale))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                sidebar
                    .get("label")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
    }
}
