//! Per-render resolution context.

use url::Url;

/// Inputs shared by every item expanded for one page render.
#[derive(Clone, Debug)]
pub struct ResolveContext {
    /// Slug prefix of the sidebar definition in effect.
    pub config_slug: String,
    /// Normalized slug path of the requested page.
    pub slug_path: String,
    /// URL the page is being rendered for.
    pub current_url: Url,
    /// Requester locale code.
    pub locale: String,
}

impl ResolveContext {
    /// Whether a link target is the page being rendered.
    ///
    /// Relative hrefs are resolved against the current URL. Trailing slashes
    /// are ignored on both sides, except for the root path.
    #[must_use]
    pub fn is_current(&self, href: &str) -> bool {
        let target = self
            .current_url
            .join(href)
            .map_or_else(|_| href.to_owned(), |u| u.path().to_owned());
        normalize_path(self.current_url.path()) == normalize_path(&target)
    }
}

fn normalize_path(path: &str) -> &str {
    if path == "/" {
        return path;
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
