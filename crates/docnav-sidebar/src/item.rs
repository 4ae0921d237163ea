//! Declared sidebar items.
//!
//! Raw YAML is validated once, when a definition is loaded, into the closed
//! [`SidebarItem`] enum. Expansion then matches exhaustively and never sees an
//! unknown shape.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::badge::BadgeSpec;
use crate::entry::Attrs;
use crate::error::SidebarError;

/// Reserved slug linking to the nearest ancestor page with a document.
pub const BACK_SLUG: &str = "::back";

/// Locale code → label.
pub type Translations = BTreeMap<String, String>;

/// Link to a collection document by slug.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlugLink {
    pub slug: String,
    pub label: Option<String>,
    pub translations: Translations,
    pub badge: Option<BadgeSpec>,
    pub attrs: Attrs,
}

impl SlugLink {
    /// Slug link with no overrides, as produced by a bare string item.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    /// Whether this is the `::back` pseudo-link.
    #[must_use]
    pub fn is_back(&self) -> bool {
        self.slug == BACK_SLUG
    }

    /// Label declared on the item for a locale, translation first.
    #[must_use]
    pub fn declared_label(&self, locale: &str) -> Option<&str> {
        localized(&self.translations, self.label.as_deref(), locale)
    }
}

/// Link to a literal URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ExternalLink {
    pub link: String,
    pub label: String,
    pub translations: Translations,
    pub badge: Option<BadgeSpec>,
    pub attrs: Attrs,
}

impl ExternalLink {
    #[must_use]
    pub fn label_for(&self, locale: &str) -> &str {
        localized(&self.translations, Some(&self.label), locale).unwrap_or(&self.label)
    }
}

/// Directive mirroring a content directory as nested groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutogenerateGroup {
    /// Directory prefix, without leading or trailing slashes.
    pub directory: String,
    /// Per-directive override of the resolver's collapsed default.
    pub collapsed: Option<bool>,
}

/// Hand-written group of nested items.
#[derive(Clone, Debug, PartialEq)]
pub struct ManualGroup {
    pub label: String,
    pub translations: Translations,
    pub collapsed: bool,
    pub badge: Option<BadgeSpec>,
    pub items: Vec<SidebarItem>,
}

impl ManualGroup {
    #[must_use]
    pub fn label_for(&self, locale: &str) -> &str {
        localized(&self.translations, Some(&self.label), locale).unwrap_or(&self.label)
    }
}

/// Validated sidebar config item.
#[derive(Clone, Debug, PartialEq)]
pub enum SidebarItem {
    Slug(SlugLink),
    Link(ExternalLink),
    Autogenerate(AutogenerateGroup),
    Group(ManualGroup),
}

/// Item mapping before shape discrimination.
#[derive(Deserialize)]
struct RawItem {
    slug: Option<String>,
    link: Option<String>,
    label: Option<String>,
    #[serde(default)]
    translations: Translations,
    badge: Option<BadgeSpec>,
    #[serde(default)]
    attrs: Attrs,
    collapsed: Option<bool>,
    autogenerate: Option<RawAutogenerate>,
    items: Option<Vec<serde_yaml::Value>>,
}

#[derive(Deserialize)]
struct RawAutogenerate {
    directory: Option<String>,
    collapsed: Option<bool>,
}

impl SidebarItem {
    /// Parse a sidebar definition: a YAML list of items.
    ///
    /// An empty document is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Parse`] for invalid YAML and
    /// [`SidebarError::UnsupportedItemShape`] for the first malformed item.
    pub fn parse_list(yaml: &str, origin: &str) -> Result<Vec<Self>, SidebarError> {
        if yaml.trim().is_empty() {
            return Ok(Vec::new());
        }
        let values: Option<Vec<serde_yaml::Value>> =
            serde_yaml::from_str(yaml).map_err(|source| SidebarError::Parse {
                origin: origin.to_owned(),
                source,
            })?;
        values
            .unwrap_or_default()
            .iter()
            .map(Self::from_value)
            .collect()
    }

    /// Validate one raw item.
    ///
    /// Shapes are tried in priority order: slug, link, autogenerate, items.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::UnsupportedItemShape`] if the value matches no
    /// shape or misses a required field.
    pub fn from_value(value: &serde_yaml::Value) -> Result<Self, SidebarError> {
        let unsupported = |reason: &str| SidebarError::UnsupportedItemShape {
            item: serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}")),
            reason: reason.to_owned(),
        };

        let raw: RawItem = match value {
            serde_yaml::Value::String(slug) => {
                if slug.is_empty() {
                    return Err(unsupported("slug must not be empty"));
                }
                return Ok(Self::Slug(SlugLink::new(slug.clone())));
            }
            // Numeric page names such as `404` arrive as YAML numbers.
            serde_yaml::Value::Number(number) => {
                return Ok(Self::Slug(SlugLink::new(number.to_string())));
            }
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value.clone())
                .map_err(|e| unsupported(&e.to_string()))?,
            _ => return Err(unsupported("expected a slug string or a mapping")),
        };

        if let Some(slug) = raw.slug {
            if slug.is_empty() {
                return Err(unsupported("slug must not be empty"));
            }
            return Ok(Self::Slug(SlugLink {
                slug,
                label: raw.label,
                translations: raw.translations,
                badge: raw.badge,
                attrs: raw.attrs,
            }));
        }

        if let Some(link) = raw.link {
            let label = raw.label.ok_or_else(|| unsupported("link requires a label"))?;
            return Ok(Self::Link(ExternalLink {
                link,
                label,
                translations: raw.translations,
                badge: raw.badge,
                attrs: raw.attrs,
            }));
        }

        if let Some(auto) = raw.autogenerate {
            let directory = auto
                .directory
                .ok_or_else(|| unsupported("autogenerate requires a directory"))?;
            return Ok(Self::Autogenerate(AutogenerateGroup {
                directory: directory.trim_matches('/').to_owned(),
                collapsed: auto.collapsed.or(raw.collapsed),
            }));
        }

        if let Some(items) = raw.items {
            let label = raw.label.ok_or_else(|| unsupported("group requires a label"))?;
            return Ok(Self::Group(ManualGroup {
                label,
                translations: raw.translations,
                collapsed: raw.collapsed.unwrap_or(false),
                badge: raw.badge,
                items: items
                    .iter()
                    .map(Self::from_value)
                    .collect::<Result<_, _>>()?,
            }));
        }

        Err(unsupported(
            "expected one of 'slug', 'link', 'autogenerate' or 'items'",
        ))
    }
}

fn localized<'a>(
    translations: &'a Translations,
    label: Option<&'a str>,
    locale: &str,
) -> Option<&'a str> {
    translations
        .get(locale)
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .or(label.filter(|s| !s.is_empty()))
}
