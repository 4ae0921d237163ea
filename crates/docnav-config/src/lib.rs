//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.root`
//! - `site.base`

mod expand;

use std::path::{Path, PathBuf};

use docnav_sidebar::{
    DEFAULT_SIDEBAR_FILE, I18nRouting, LocaleConfig, ResolverOptions, TrailingSlash,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content root directory.
    pub content_root: Option<PathBuf>,
    /// Override default locale.
    pub default_locale: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Sidebar resolution configuration.
    pub sidebar: SidebarConfig,
    /// Site URL configuration.
    pub site: SiteConfig,
    /// Locale configuration.
    pub i18n: I18nConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root: Option<String>,
    collection: Option<String>,
    sidebar_file: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding one subdirectory per collection.
    pub root: PathBuf,
    /// Collection the sidebar links into.
    pub collection: String,
    /// Sidebar definition file name.
    pub sidebar_file: String,
}

impl ContentConfig {
    /// Directory of the sidebar collection.
    #[must_use]
    pub fn collection_dir(&self) -> PathBuf {
        self.root.join(&self.collection)
    }
}

/// Sidebar resolution configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Collapsed state of autogenerated groups.
    pub autogenerate_collapsed: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            autogenerate_collapsed: true,
        }
    }
}

/// Site URL configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base path the site is served under.
    pub base: String,
    /// Trailing slash policy for generated links.
    pub trailing_slash: TrailingSlash,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base: "/".to_owned(),
            trailing_slash: TrailingSlash::default(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale served without a URL prefix.
    pub default_locale: String,
    /// Prefix default-locale URLs too.
    pub prefix_default_locale: bool,
    /// Declared locales.
    pub locales: Vec<LocaleConfig>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            prefix_default_locale: false,
            locales: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.root`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to be a single path segment.
fn require_segment(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.contains('/') || value.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain path separators"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_root) = &settings.content_root {
            self.content_resolved.root.clone_from(content_root);
        }
        if let Some(default_locale) = &settings.default_locale {
            self.i18n.default_locale.clone_from(default_locale);
        }
    }

    /// Search for config file in a directory and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            content: ContentConfigRaw::default(),
            sidebar: SidebarConfig::default(),
            site: SiteConfig::default(),
            i18n: I18nConfig::default(),
            content_resolved: ContentConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_content()?;
        self.validate_site()?;
        self.validate_i18n()?;
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        require_segment(&self.content_resolved.collection, "content.collection")?;
        require_segment(&self.content_resolved.sidebar_file, "content.sidebar_file")?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        if !self.site.base.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.base must start with /".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_i18n(&self) -> Result<(), ConfigError> {
        require_segment(&self.i18n.default_locale, "i18n.default_locale")?;
        for locale in &self.i18n.locales {
            require_segment(&locale.path, "i18n.locales.path")?;
        }
        if !self.i18n.locales.is_empty()
            && !self
                .i18n
                .locales
                .iter()
                .any(|l| l.path == self.i18n.default_locale)
        {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale '{}' is not a declared locale path",
                self.i18n.default_locale
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.content.root {
            self.content.root = Some(expand::expand_env(root, "content.root")?);
        }
        self.site.base = expand::expand_env(&self.site.base, "site.base")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory and fill defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            root: config_dir.join(self.content.root.as_deref().unwrap_or("src/content")),
            collection: self
                .content
                .collection
                .clone()
                .unwrap_or_else(|| "docs".to_owned()),
            sidebar_file: self
                .content
                .sidebar_file
                .clone()
                .unwrap_or_else(|| DEFAULT_SIDEBAR_FILE.to_owned()),
        };
    }

    /// Locale codes a full site build renders, default locale first.
    #[must_use]
    pub fn locales(&self) -> Vec<String> {
        let mut locales = vec![self.i18n.default_locale.clone()];
        locales.extend(
            self.i18n
                .locales
                .iter()
                .map(|l| l.path.clone())
                .filter(|p| *p != self.i18n.default_locale),
        );
        locales
    }

    /// URL builder for the configured site.
    #[must_use]
    pub fn routing(&self) -> I18nRouting {
        I18nRouting::new(self.i18n.default_locale.clone())
            .with_base(self.site.base.clone())
            .with_locales(self.i18n.locales.clone())
            .with_prefix_default_locale(self.i18n.prefix_default_locale)
            .with_trailing_slash(self.site.trailing_slash)
    }

    /// Sidebar resolver options.
    #[must_use]
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            collection: self.content_resolved.collection.clone(),
            autogenerate_collapsed: self.sidebar.autogenerate_collapsed,
        }
    }
}
