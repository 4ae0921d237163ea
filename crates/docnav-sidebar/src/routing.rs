//! Locale-aware URL building.

use docnav_content::segments;
use serde::Deserialize;

/// Builds page URLs for a locale.
///
/// Implemented by the routing layer of the site. [`I18nRouting`] covers the
/// usual prefix-per-locale layout.
pub trait LocaleRouting: Send + Sync {
    /// Site-relative URL of a page slug in a locale.
    fn build_url(&self, locale: &str, slug: &str) -> String;

    /// Leading path segment used by a locale's URLs, `None` if unprefixed.
    fn locale_segment(&self, locale: &str) -> Option<String>;
}

/// Trailing slash policy for generated URLs.
///
/// `Ignore` generates directory-style URLs with a trailing slash, the same
/// output as `Always`. The difference only matters to the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    #[default]
    Ignore,
    Always,
    Never,
}

/// One site locale.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LocaleConfig {
    /// URL path segment, e.g. `fr`.
    pub path: String,
    /// Locale codes routed to this path, e.g. `fr`, `fr_FR`.
    #[serde(default)]
    pub codes: Vec<String>,
}

impl LocaleConfig {
    /// Locale whose only code is its path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            codes: vec![path.clone()],
            path,
        }
    }

    /// Add accepted locale codes.
    #[must_use]
    pub fn with_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes.extend(codes.into_iter().map(Into::into));
        self
    }

    fn matches(&self, code: &str) -> bool {
        self.path == code || self.codes.iter().any(|c| c == code)
    }
}

/// Prefix-per-locale routing: `<base>/<locale?>/<slug>`.
///
/// The default locale is served without a prefix unless
/// `prefix_default_locale` is set. Unknown locale codes route like the
/// default locale. Without a locale table every code is its own path.
#[derive(Clone, Debug)]
pub struct I18nRouting {
    base: String,
    default_locale: String,
    locales: Vec<LocaleConfig>,
    prefix_default_locale: bool,
    trailing_slash: TrailingSlash,
}

impl Default for I18nRouting {
    fn default() -> Self {
        Self::new("en")
    }
}

impl I18nRouting {
    /// Routing with a default locale and no locale table.
    #[must_use]
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            base: "/".to_owned(),
            default_locale: default_locale.into(),
            locales: Vec::new(),
            prefix_default_locale: false,
            trailing_slash: TrailingSlash::default(),
        }
    }

    /// Set the site base path.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Set the locale table.
    #[must_use]
    pub fn with_locales(mut self, locales: Vec<LocaleConfig>) -> Self {
        self.locales = locales;
        self
    }

    /// Prefix default-locale URLs with their segment too.
    #[must_use]
    pub fn with_prefix_default_locale(mut self, prefix: bool) -> Self {
        self.prefix_default_locale = prefix;
        self
    }

    /// Set the trailing slash policy.
    #[must_use]
    pub fn with_trailing_slash(mut self, trailing_slash: TrailingSlash) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    /// Default locale path.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Declared locales, in configuration order.
    #[must_use]
    pub fn locales(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Path segment a locale code maps to.
    fn path_for<'a>(&'a self, locale: &'a str) -> &'a str {
        if self.locales.is_empty() {
            return locale;
        }
        self.locales
            .iter()
            .find(|l| l.matches(locale))
            .or_else(|| self.locales.iter().find(|l| l.matches(&self.default_locale)))
            .map_or(self.default_locale.as_str(), |l| l.path.as_str())
    }
}

impl LocaleRouting for I18nRouting {
    fn build_url(&self, locale: &str, slug: &str) -> String {
        let prefix = self.locale_segment(locale);
        let parts: Vec<&str> = segments(&self.base)
            .chain(prefix.as_deref())
            .chain(segments(slug))
            .collect();

        if parts.is_empty() {
            return "/".to_owned();
        }
        let mut url = format!("/{}", parts.join("/"));
        if self.trailing_slash != TrailingSlash::Never {
            url.push('/');
        }
        url
    }

    fn locale_segment(&self, locale: &str) -> Option<String> {
        let path = self.path_for(locale);
        let default_path = self.path_for(&self.default_locale);
        if path == default_path && !self.prefix_default_locale {
            return None;
        }
        Some(path.to_owned())
    }
}
