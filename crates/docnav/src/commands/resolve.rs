//! `docnav resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use url::Url;

use super::{build_resolver, page_url};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Page path, e.g. `guides/intro` or `/fr/guides/intro/`.
    path: String,

    /// URL of the page being rendered (default: the page's own URL).
    #[arg(short, long)]
    url: Option<String>,

    /// Locale of the page (default: the configured default locale).
    #[arg(short, long)]
    locale: Option<String>,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(short = 'r', long, env = "DOCNAV_CONTENT_ROOT")]
    content_root: Option<PathBuf>,

    /// Default locale (overrides config).
    #[arg(long)]
    default_locale: Option<String>,

    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,
}

impl ResolveArgs {
    /// Config overrides taken from the arguments.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            content_root: self.content_root.clone(),
            default_locale: self.default_locale.clone(),
        }
    }

    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the sidebar cannot be
    /// resolved.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let locale = self
            .locale
            .unwrap_or_else(|| config.i18n.default_locale.clone());

        let resolver = build_resolver(&config)?;
        let current_url = match self.url {
            Some(url) => Url::parse(&url)?,
            None => {
                let slug = resolver.normalize_slug_path(&self.path, &locale);
                page_url(resolver.routing(), &locale, &slug)?
            }
        };
        tracing::debug!(path = %self.path, url = %current_url, locale = %locale, "Resolving page");

        let entries = resolver.resolve(&self.path, &current_url, &locale).await?;
        let json = if self.compact {
            serde_json::to_string(&entries)?
        } else {
            serde_json::to_string_pretty(&entries)?
        };
        Output::document(&json)?;

        Ok(())
    }
}
