//! Sidebar resolution for a page render.

use std::sync::Arc;

use docnav_content::{ContentStore, strip_index};
use futures::future::try_join_all;
use url::Url;

use crate::context::ResolveContext;
use crate::entry::SidebarEntry;
use crate::error::SidebarError;
use crate::expander::Expander;
use crate::registry::SidebarRegistry;
use crate::routing::LocaleRouting;

/// Resolver settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Content collection documents are looked up in.
    pub collection: String,
    /// Collapsed state of autogenerated groups when a directive sets none.
    pub autogenerate_collapsed: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            collection: "docs".to_owned(),
            autogenerate_collapsed: true,
        }
    }
}

/// Resolves the sidebar tree of a page.
///
/// Holds the collaborators shared by every render. Each call to
/// [`resolve`](Self::resolve) is independent: nothing is cached between
/// renders.
pub struct SidebarResolver {
    store: Arc<dyn ContentStore>,
    registry: Arc<SidebarRegistry>,
    routing: Arc<dyn LocaleRouting>,
    options: ResolverOptions,
}

impl SidebarResolver {
    /// Create a resolver.
    #[must_use]
    pub fn new(
        store: Arc<dyn ContentStore>,
        registry: Arc<SidebarRegistry>,
        routing: Arc<dyn LocaleRouting>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            store,
            registry,
            routing,
            options,
        }
    }

    /// Sidebar definitions in use.
    #[must_use]
    pub fn registry(&self) -> &SidebarRegistry {
        &self.registry
    }

    /// URL builder in use.
    #[must_use]
    pub fn routing(&self) -> &dyn LocaleRouting {
        self.routing.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Normalize a requested slug path.
    ///
    /// Strips surrounding slashes, the locale's URL segment and a trailing
    /// `index` segment. The home page normalizes to the empty string.
    #[must_use]
    pub fn normalize_slug_path(&self, slug_path: &str, locale: &str) -> String {
        let mut path = slug_path.trim_matches('/');
        if let Some(segment) = self.routing.locale_segment(locale) {
            if path == segment {
                path = "";
            } else if let Some(rest) = path
                .strip_prefix(segment.as_str())
                .and_then(|r| r.strip_prefix('/'))
            {
                path = rest;
            }
        }
        strip_index(path).to_owned()
    }

    /// Resolve the sidebar for a page.
    ///
    /// Top-level items are expanded concurrently and returned in declaration
    /// order.
    ///
    /// # Errors
    ///
    /// Fails with [`SidebarError::ConfigNotFound`] if no definition governs
    /// the page, and with the first error of any item expansion.
    pub async fn resolve(
        &self,
        slug_path: &str,
        current_url: &Url,
        locale: &str,
    ) -> Result<Vec<SidebarEntry>, SidebarError> {
        let slug_path = self.normalize_slug_path(slug_path, locale);
        let (items, config_slug) = self.registry.locate(&slug_path)?;
        tracing::debug!(
            slug_path = %slug_path,
            config_slug = %config_slug,
            item_count = items.len(),
            "Resolving sidebar"
        );

        let ctx = ResolveContext {
            config_slug,
            slug_path,
            current_url: current_url.clone(),
            locale: locale.to_owned(),
        };
        let expander = Expander {
            store: self.store.as_ref(),
            routing: self.routing.as_ref(),
            options: &self.options,
        };

        try_join_all(items.iter().map(|item| expander.expand_item(item, &ctx))).await
    }
}
