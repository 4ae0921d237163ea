//! Sidebar resolution errors.

use std::path::PathBuf;

use docnav_content::ContentError;

/// Error returned when a sidebar cannot be loaded or resolved.
///
/// Every variant is fatal for the render that triggered it: no partial tree
/// is produced.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// No sidebar definition on the ancestor chain, root included.
    #[error("Sidebar config not found for path '{slug_path}'")]
    ConfigNotFound {
        /// Normalized slug path that was looked up.
        slug_path: String,
    },
    /// A slug references a document that does not exist.
    #[error("Collection entry not found for slug '{slug}'")]
    EntryNotFound {
        /// Last slug that was tried.
        slug: String,
    },
    /// Auto-group table has no node for a key.
    #[error("Collection group not found for key '{key}'")]
    GroupKeyNotFound {
        /// Missing group key.
        key: String,
    },
    /// A declared item matches none of the supported shapes.
    #[error("Unsupported sidebar config item {item}: {reason}")]
    UnsupportedItemShape {
        /// Offending item, serialized as JSON.
        item: String,
        /// Why the item was rejected.
        reason: String,
    },
    /// Sidebar definition file is not valid YAML.
    #[error("Invalid sidebar definition {origin}: {source}")]
    Parse {
        /// File path or registry slug the definition came from.
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
    /// Sidebar definition file could not be read.
    #[error("Failed to read sidebar definition {}: {source}", .path.display())]
    Io {
        /// Path of the definition file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Content collection backend failed.
    #[error("{0}")]
    Content(#[from] ContentError),
}
