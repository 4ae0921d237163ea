//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;

use std::sync::Arc;

use docnav_config::Config;
use docnav_content_fs::FsStore;
use docnav_sidebar::{LocaleRouting, SidebarRegistry, SidebarResolver};
use url::Url;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;

/// Origin that page paths are joined to when no URL is given.
const PAGE_ORIGIN: &str = "http://localhost/";

/// Build a resolver over the configured content collection.
fn build_resolver(config: &Config) -> Result<SidebarResolver, CliError> {
    let content = &config.content_resolved;
    let registry = SidebarRegistry::load_dir(&content.collection_dir(), &content.sidebar_file)?;
    let store = FsStore::new(content.root.clone());

    Ok(SidebarResolver::new(
        Arc::new(store),
        Arc::new(registry),
        Arc::new(config.routing()),
        config.resolver_options(),
    ))
}

/// Absolute URL of a page, as served by the site.
fn page_url(routing: &dyn LocaleRouting, locale: &str, slug: &str) -> Result<Url, CliError> {
    Ok(Url::parse(PAGE_ORIGIN)?.join(&routing.build_url(locale, slug))?)
}

#[cfg(test)]
mod tests {
    use docnav_sidebar::{I18nRouting, TrailingSlash};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_page_url() {
        let routing = I18nRouting::new("en").with_base("/docs");

        let url = page_url(&routing, "en", "guides/intro").unwrap();

        assert_eq!(url.as_str(), "http://localhost/docs/guides/intro/");
    }

    #[test]
    fn test_page_url_home() {
        let routing = I18nRouting::new("en").with_trailing_slash(TrailingSlash::Never);

        let url = page_url(&routing, "en", "").unwrap();

        assert_eq!(url.as_str(), "http://localhost/");
    }
}
