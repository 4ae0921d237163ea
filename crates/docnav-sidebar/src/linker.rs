//! Collection entry → link entry.

use docnav_content::{Document, last_segment, strip_index};

use crate::badge::format_badge;
use crate::context::ResolveContext;
use crate::entry::LinkEntry;
use crate::item::SlugLink;
use crate::routing::LocaleRouting;

/// Build the link entry for a collection document.
///
/// Label resolution order:
/// 1. item translation for the active locale
/// 2. item label
/// 3. document frontmatter `sidebar` label (translation first)
/// 4. document title
/// 5. last slug segment, or `index` for the root page
///
/// Badge and attributes come from the item only. Synthetic entries
/// (`::back`, auto-group members, bare slugs) pass no overrides.
pub(crate) fn link_entry(
    item: Option<&SlugLink>,
    document: &Document,
    ctx: &ResolveContext,
    routing: &dyn LocaleRouting,
) -> LinkEntry {
    let slug = strip_index(&document.id);
    let href = routing.build_url(&ctx.locale, slug);

    let label = item
        .and_then(|i| i.declared_label(&ctx.locale))
        .or_else(|| document.sidebar_label(&ctx.locale))
        .or_else(|| document.title.as_deref().filter(|t| !t.is_empty()))
        .or_else(|| last_segment(slug))
        .unwrap_or("index")
        .to_owned();

    LinkEntry {
        label,
        is_current: ctx.is_current(&href),
        href,
        badge: item.and_then(|i| format_badge(i.badge.as_ref())),
        attrs: item.map(|i| i.attrs.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::badge::BadgeSpec;
    use crate::entry::{Attrs, Badge, BadgeVariant};
    use crate::routing::{I18nRouting, LocaleConfig};

    fn context(url: &str, locale: &str) -> ResolveContext {
        ResolveContext {
            config_slug: String::new(),
            slug_path: String::new(),
            current_url: Url::parse(url).unwrap(),
            locale: locale.to_owned(),
        }
    }

    fn routing() -> I18nRouting {
        I18nRouting::new("en").with_locales(vec![LocaleConfig::new("en"), LocaleConfig::new("fr")])
    }

    #[test]
    fn test_plain_document() {
        let doc = Document::new("guide/setup", Some("Setup".to_owned()));
        let ctx = context("https://example.com/guide/", "en");

        let link = link_entry(None, &doc, &ctx, &routing());

        assert_eq!(
            link,
            LinkEntry {
                label: "Setup".to_owned(),
                href: "/guide/setup/".to_owned(),
                is_current: false,
                badge: None,
                attrs: Attrs::new(),
            }
        );
    }

    #[test]
    fn test_index_document_links_to_root() {
        let doc = Document::new("index", None);
        let ctx = context("https://example.com/", "en");

        let link = link_entry(None, &doc, &ctx, &routing());

        assert_eq!(link.href, "/");
        assert_eq!(link.label, "index");
        assert!(link.is_current);
    }

    #[test]
    fn test_untitled_uses_last_segment() {
        let doc = Document::new("guide/first-steps", None);
        let ctx = context("https://example.com/fr/guide/first-steps", "fr");

        let link = link_entry(None, &doc, &ctx, &routing());

        assert_eq!(link.label, "first-steps");
        assert_eq!(link.href, "/fr/guide/first-steps/");
        assert!(link.is_current);
    }

    #[test]
    fn test_item_overrides() {
        let doc = Document::new("reference", Some("Reference".to_owned()));
        let item = SlugLink {
            slug: "reference".to_owned(),
            label: Some("API".to_owned()),
            translations: [("fr".to_owned(), "Référence API".to_owned())].into(),
            badge: Some(BadgeSpec::Text("New".to_owned())),
            attrs: [("target".to_owned(), json!("_blank"))].into(),
        };

        let en = link_entry(Some(&item), &doc, &context("https://example.com/", "en"), &routing());
        let fr = link_entry(Some(&item), &doc, &context("https://example.com/", "fr"), &routing());

        assert_eq!(en.label, "API");
        assert_eq!(fr.label, "Référence API");
        assert_eq!(
            en.badge,
            Some(Badge {
                variant: BadgeVariant::Default,
                text: "New".to_owned(),
                class: None,
            })
        );
        assert_eq!(en.attrs.get("target"), Some(&json!("_blank")));
    }

    #[test]
    fn test_empty_item_label_falls_back_to_title() {
        let doc = Document::new("guide", Some("Guide".to_owned()));
        let mut item = SlugLink::new("guide");
        item.label = Some(String::new());

        let link = link_entry(Some(&item), &doc, &context("https://example.com/", "en"), &routing());

        assert_eq!(link.label, "Guide");
    }

    #[test]
    fn test_frontmatter_sidebar_label_before_title() {
        let serde_json::Value::Object(data) = json!({
            "sidebar": { "label": "Start", "translations": { "fr": "Débuter" } }
        }) else {
            unreachable!()
        };
        let doc = Document::new("start", Some("Getting Started".to_owned())).with_data(data);

        let en = link_entry(None, &doc, &context("https://example.com/", "en"), &routing());
        let fr = link_entry(None, &doc, &context("https://example.com/", "fr"), &routing());

        assert_eq!(en.label, "Start");
        assert_eq!(fr.label, "Débuter");
    }
}
