//! Sidebar resolution engine for docnav documentation sites.
//!
//! This crate provides:
//! - [`SidebarResolver`]: resolves the sidebar tree for a requested page
//! - [`SidebarRegistry`]: slug-prefix → sidebar definition mapping, loaded once
//! - [`SidebarItem`] / [`SidebarEntry`]: declared input and resolved output
//! - [`I18nRouting`]: locale-aware URL building
//!
//! # Resolution
//!
//! For a page, the nearest sidebar definition on its slug's ancestor chain is
//! selected (most specific wins). Each declared item is expanded into a
//! [`SidebarEntry`]: slugs become links to collection documents, `::back`
//! links to the nearest ancestor document, `autogenerate` mirrors a content
//! directory as nested groups, and manual groups recurse. The entry whose URL
//! matches the current URL is marked current.
//!
//! # Quick Start
//!
//! ```ignore
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use std::sync::Arc;
//! use docnav_sidebar::{I18nRouting, ResolverOptions, SidebarRegistry, SidebarResolver};
//! use docnav_content::MockStore;
//!
//! let registry = SidebarRegistry::load_dir(Path::new("src/content/docs"), "sidebar.yaml")?;
//! let resolver = SidebarResolver::new(
//!     Arc::new(MockStore::new()),
//!     Arc::new(registry),
//!     Arc::new(I18nRouting::default()),
//!     ResolverOptions::default(),
//! );
//!
//! let url = url::Url::parse("https://example.com/guides/intro/")?;
//! let entries = resolver.resolve("guides/intro", &url, "en").await?;
//! # Ok(())
//! # }
//! ```

mod autogroup;
mod badge;
mod context;
mod entry;
mod error;
mod expander;
mod item;
mod linker;
mod registry;
mod resolver;
mod routing;

pub use badge::{BadgeSpec, format_badge};
pub use context::ResolveContext;
pub use entry::{Attrs, Badge, BadgeVariant, GroupEntry, LinkEntry, SidebarEntry};
pub use error::SidebarError;
pub use item::{
    AutogenerateGroup, BACK_SLUG, ExternalLink, ManualGroup, SidebarItem, SlugLink, Translations,
};
pub use registry::{DEFAULT_SIDEBAR_FILE, SidebarRegistry};
pub use resolver::{ResolverOptions, SidebarResolver};
pub use routing::{I18nRouting, LocaleConfig, LocaleRouting, TrailingSlash};
