//! `docnav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_content::{ContentStore, strip_index};
use docnav_content_fs::FsStore;
use docnav_sidebar::SidebarResolver;

use super::{build_resolver, page_url};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(short = 'r', long, env = "DOCNAV_CONTENT_ROOT")]
    content_root: Option<PathBuf>,

    /// Default locale (overrides config).
    #[arg(long)]
    default_locale: Option<String>,
}

/// A page whose sidebar failed to resolve.
#[derive(Debug, PartialEq, Eq)]
struct Failure {
    locale: String,
    slug: String,
    message: String,
}

impl CheckArgs {
    /// Config overrides taken from the arguments.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            content_root: self.content_root.clone(),
            default_locale: self.default_locale.clone(),
        }
    }

    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the collection cannot be
    /// listed, or any page fails to resolve.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        output.info(&format!(
            "Collection: {}",
            config.content_resolved.collection_dir().display()
        ));

        let resolver = build_resolver(&config)?;
        output.info(&format!(
            "Sidebar definitions: {}",
            resolver.registry().len()
        ));

        let store = FsStore::new(config.content_resolved.root.clone());
        let locales = config.locales();
        let (checked, failures) = check_pages(&resolver, &store, &locales).await?;

        for failure in &failures {
            output.warning(&format!(
                "[{}] {}: {}",
                failure.locale,
                display_slug(&failure.slug),
                failure.message
            ));
        }

        if failures.is_empty() {
            output.success(&format!(
                "Resolved {checked} page(s) in {} locale(s)",
                locales.len()
            ));
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} of {checked} page(s) failed sidebar resolution",
                failures.len()
            )))
        }
    }
}

/// Resolve the sidebar of every collection page in every locale.
///
/// Returns the number of resolutions attempted and the failures, ordered by
/// locale then page id.
async fn check_pages(
    resolver: &SidebarResolver,
    store: &dyn ContentStore,
    locales: &[String],
) -> Result<(usize, Vec<Failure>), CliError> {
    let mut documents = store
        .get_collection(&resolver.options().collection, &|_| true)
        .await?;
    documents.sort_unstable_by(|a, b| a.id.cmp(&b.id));

    let mut checked = 0;
    let mut failures = Vec::new();
    for locale in locales {
        for document in &documents {
            let slug = strip_index(&document.id);
            let url = page_url(resolver.routing(), locale, slug)?;
            checked += 1;
            if let Err(err) = resolver.resolve(slug, &url, locale).await {
                failures.push(Failure {
                    locale: locale.clone(),
                    slug: slug.to_owned(),
                    message: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        checked,
        failure_count = failures.len(),
        "Sidebar check completed"
    );
    Ok((checked, failures))
}

fn display_slug(slug: &str) -> &str {
    if slug.is_empty() { "(home)" } else { slug }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use docnav_content::MockStore;
    use docnav_sidebar::{I18nRouting, ResolverOptions, SidebarRegistry};
    use pretty_assertions::assert_eq;

    use super::*;

    fn store() -> MockStore {
        MockStore::new()
            .with_document("docs", "index", "Home")
            .with_document("docs", "guides/intro", "Intro")
            .with_document("docs", "api/reference", "Reference")
    }

    fn resolver(store: MockStore, registry: SidebarRegistry) -> SidebarResolver {
        SidebarResolver::new(
            Arc::new(store),
            Arc::new(registry),
            Arc::new(I18nRouting::new("en")),
            ResolverOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_check_pages_all_resolve() {
        let mut registry = SidebarRegistry::new();
        registry.parse("", "- index\n- guides/intro\n").unwrap();
        let resolver = resolver(store(), registry);

        let (checked, failures) = check_pages(&resolver, &store(), &["en".to_owned()])
            .await
            .unwrap();

        assert_eq!(checked, 3);
        assert!(failures.is_empty());
    }

    #[tokio::test]
    async fn test_check_pages_reports_failures_per_locale() {
        let mut registry = SidebarRegistry::new();
        registry.parse("", "- index\n").unwrap();
        registry.parse("api", "- api/missing\n").unwrap();
        let resolver = resolver(store(), registry);
        let locales = vec!["en".to_owned(), "fr".to_owned()];

        let (checked, failures) = check_pages(&resolver, &store(), &locales).await.unwrap();

        assert_eq!(checked, 6);
        let failed: Vec<(&str, &str)> = failures
            .iter()
            .map(|f| (f.locale.as_str(), f.slug.as_str()))
            .collect();
        assert_eq!(failed, vec![("en", "api/reference"), ("fr", "api/reference")]);
        assert!(failures[0].message.contains("api/missing"));
    }

    #[tokio::test]
    async fn test_check_pages_collection_error() {
        let resolver = resolver(store(), SidebarRegistry::new());
        let failing = MockStore::new().with_failure("docs");

        let result = check_pages(&resolver, &failing, &["en".to_owned()]).await;

        assert!(matches!(result, Err(CliError::Content(_))));
    }

    #[test]
    fn test_display_slug() {
        assert_eq!(display_slug(""), "(home)");
        assert_eq!(display_slug("guides"), "guides");
    }
}
