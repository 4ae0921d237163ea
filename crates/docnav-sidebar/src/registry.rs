//! Sidebar definitions keyed by slug prefix.
//!
//! Definitions are parsed and validated once, when the registry is built.
//! Lookup walks from the most specific ancestor of a page to the root.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use docnav_content::{join_segments, segments};

use crate::error::SidebarError;
use crate::item::SidebarItem;

/// Default sidebar definition file name.
pub const DEFAULT_SIDEBAR_FILE: &str = "sidebar.yaml";

/// Slug prefix → validated sidebar items.
#[derive(Clone, Debug, Default)]
pub struct SidebarRegistry {
    configs: HashMap<String, Vec<SidebarItem>>,
}

impl SidebarRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register items for a slug prefix, replacing any previous definition.
    ///
    /// The root prefix is the empty string.
    pub fn insert(&mut self, slug: &str, items: Vec<SidebarItem>) -> Option<Vec<SidebarItem>> {
        self.configs.insert(normalize_slug(slug), items)
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_config(mut self, slug: &str, items: Vec<SidebarItem>) -> Self {
        self.insert(slug, items);
        self
    }

    /// Parse a YAML definition and register it for a slug prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Parse`] or [`SidebarError::UnsupportedItemShape`]
    /// if the definition is invalid.
    pub fn parse(&mut self, slug: &str, yaml: &str) -> Result<(), SidebarError> {
        let items = SidebarItem::parse_list(yaml, &format!("for '{slug}'"))?;
        self.insert(slug, items);
        Ok(())
    }

    /// Load every `file_name` under a content directory.
    ///
    /// The definition at `<root>/<prefix>/<file_name>` is registered for
    /// `prefix`. Hidden and `_`-prefixed directories are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Io`] if the root or a definition file cannot be
    /// read, and a parse error for the first invalid definition.
    pub fn load_dir(root: &Path, file_name: &str) -> Result<Self, SidebarError> {
        let mut registry = Self::new();
        let mut dirs = vec![root.to_path_buf()];

        while let Some(dir) = dirs.pop() {
            let entries = fs::read_dir(&dir).map_err(|source| SidebarError::Io {
                path: dir.clone(),
                source,
            })?;
            let mut subdirs: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
                .map(|e| e.path())
                .filter(|p| {
                    p.file_name()
                        .map(|n| n.to_string_lossy())
                        .is_some_and(|n| !n.starts_with('.') && !n.starts_with('_'))
                })
                .collect();
            subdirs.sort_unstable_by(|a, b| b.cmp(a));
            dirs.extend(subdirs);

            let file = dir.join(file_name);
            if !file.is_file() {
                continue;
            }
            let content = fs::read_to_string(&file).map_err(|source| SidebarError::Io {
                path: file.clone(),
                source,
            })?;
            let items = SidebarItem::parse_list(&content, &file.display().to_string())?;
            let slug = slug_for(root, &dir);
            tracing::debug!(slug = %slug, path = %file.display(), "Loaded sidebar definition");
            registry.insert(&slug, items);
        }

        tracing::info!(
            root = %root.display(),
            definition_count = registry.len(),
            "Sidebar definitions loaded"
        );
        Ok(registry)
    }

    /// Items registered for an exact slug prefix.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&[SidebarItem]> {
        self.configs.get(&normalize_slug(slug)).map(Vec::as_slice)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether no definition is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Registered slug prefixes, sorted.
    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.configs.keys().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }

    /// Find the definition governing a normalized slug path.
    ///
    /// Tries the full path, then each shorter ancestor, then the root. Returns
    /// the items and the prefix they were registered at.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::ConfigNotFound`] if no ancestor has a
    /// definition.
    pub fn locate(&self, slug_path: &str) -> Result<(&[SidebarItem], String), SidebarError> {
        let parts: Vec<&str> = segments(slug_path).collect();
        for depth in (0..=parts.len()).rev() {
            let slug = join_segments(&parts[..depth]);
            tracing::debug!(slug = %slug, "Looking up sidebar definition");
            if let Some(items) = self.configs.get(&slug) {
                return Ok((items, slug));
            }
        }
        Err(SidebarError::ConfigNotFound {
            slug_path: slug_path.to_owned(),
        })
    }
}

fn normalize_slug(slug: &str) -> String {
    join_segments(&segments(slug).collect::<Vec<_>>())
}

/// Slug prefix of a directory below the content root.
fn slug_for(root: &Path, dir: &Path) -> String {
    let rel = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::item::SlugLink;

    fn slug(s: &str) -> SidebarItem {
        SidebarItem::Slug(SlugLink::new(s))
    }

    #[test]
    fn test_locate_not_found() {
        let registry = SidebarRegistry::new().with_config("guides", vec![slug("a")]);

        let err = registry.locate("api/reference").unwrap_err();

        assert!(matches!(
            err,
            SidebarError::ConfigNotFound { slug_path } if slug_path == "api/reference"
        ));
    }

    #[test]
    fn test_locate_empty_registry() {
        let err = SidebarRegistry::new().locate("").unwrap_err();
        assert!(matches!(err, SidebarError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_locate_deepest_wins() {
        let registry = SidebarRegistry::new()
            .with_config("", vec![slug("root")])
            .with_config("guides", vec![slug("guides")])
            .with_config("guides/advanced", vec![slug("advanced")]);

        let (items, found) = registry.locate("guides/advanced/tuning").unwrap();
        assert_eq!(found, "guides/advanced");
        assert_eq!(items, &[slug("advanced")]);

        let (items, found) = registry.locate("guides/intro").unwrap();
        assert_eq!(found, "guides");
        assert_eq!(items, &[slug("guides")]);

        let (_, found) = registry.locate("blog").unwrap();
        assert_eq!(found, "");
    }

    #[test]
    fn test_locate_exact_match() {
        let registry = SidebarRegistry::new().with_config("/guides/", vec![slug("g")]);

        let (_, found) = registry.locate("guides").unwrap();

        assert_eq!(found, "guides");
        assert!(registry.get("guides").is_some());
    }

    #[test]
    fn test_parse_registers_items() {
        let mut registry = SidebarRegistry::new();
        registry.parse("", "- index\n- guide\n").unwrap();

        assert_eq!(registry.get(""), Some(&[slug("index"), slug("guide")][..]));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_item() {
        let mut registry = SidebarRegistry::new();
        let err = registry.parse("", "- { label: Nothing }\n").unwrap_err();

        assert!(matches!(err, SidebarError::UnsupportedItemShape { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("guides/advanced")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::create_dir_all(root.join("_drafts")).unwrap();
        fs::write(root.join("sidebar.yaml"), "- index\n").unwrap();
        fs::write(root.join("guides/advanced/sidebar.yaml"), "- '::back'\n").unwrap();
        fs::write(root.join(".hidden/sidebar.yaml"), "- secret\n").unwrap();
        fs::write(root.join("_drafts/sidebar.yaml"), "- draft\n").unwrap();

        let registry = SidebarRegistry::load_dir(root, DEFAULT_SIDEBAR_FILE).unwrap();

        assert_eq!(registry.slugs(), vec!["", "guides/advanced"]);
        assert_eq!(registry.get(""), Some(&[slug("index")][..]));
    }

    #[test]
    fn test_load_dir_custom_file_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("nav.yml"), "- index\n").unwrap();
        fs::write(temp_dir.path().join("sidebar.yaml"), "- ignored\n").unwrap();

        let registry = SidebarRegistry::load_dir(temp_dir.path(), "nav.yml").unwrap();

        assert_eq!(registry.get(""), Some(&[slug("index")][..]));
    }

    #[test]
    fn test_load_dir_invalid_definition() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("api")).unwrap();
        fs::write(temp_dir.path().join("api/sidebar.yaml"), "- 12\n").unwrap();

        let err = SidebarRegistry::load_dir(temp_dir.path(), DEFAULT_SIDEBAR_FILE).unwrap_err();

        assert!(matches!(err, SidebarError::UnsupportedItemShape { .. }));
    }

    #[test]
    fn test_load_dir_missing_root() {
        let err = SidebarRegistry::load_dir(Path::new("/nonexistent/docs"), DEFAULT_SIDEBAR_FILE)
            .unwrap_err();

        assert!(matches!(err, SidebarError::Io { .. }));
    }
}
