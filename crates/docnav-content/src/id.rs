//! Helpers for slash-separated document ids and slugs.

/// Non-empty segments of a slash-separated path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Join path segments with `/`.
#[must_use]
pub fn join_segments(parts: &[&str]) -> String {
    parts.join("/")
}

/// Strip a trailing `/index` segment (or a bare `index` id).
///
/// `"index"` → `""`, `"guide/index"` → `"guide"`, `"guide"` → `"guide"`.
#[must_use]
pub fn strip_index(id: &str) -> &str {
    if id == "index" {
        return "";
    }
    id.strip_suffix("/index").unwrap_or(id)
}

/// Last non-empty segment of a slug, `None` for the root slug.
#[must_use]
pub fn last_segment(slug: &str) -> Option<&str> {
    slug.rsplit('/').find(|s| !s.is_empty())
}

/// Slug with the last segment removed.
///
/// `"a/b/c"` → `"a/b"`, `"a"` → `""`, `""` → `""`.
#[must_use]
pub fn parent_slug(slug: &str) -> &str {
    let trimmed = slug.trim_end_matches('/');
    trimmed.rfind('/').map_or("", |i| &trimmed[..i])
}

/// Check whether an id lives at or below a directory.
///
/// Matches on segment boundaries: `"guides/intro"` is within `"guides"`,
/// `"guidesx"` is not. An empty directory contains every id.
#[must_use]
pub fn is_within(id: &str, directory: &str) -> bool {
    let directory = directory.trim_matches('/');
    if directory.is_empty() {
        return true;
    }
    id.strip_prefix(directory)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_skip_empty() {
        let parts: Vec<_> = segments("/a//b/").collect();
        assert_eq!(parts, vec!["a", "b"]);
        assert_eq!(segments("").count(), 0);
    }

    #[test]
    fn test_strip_index() {
        assert_eq!(strip_index("index"), "");
        assert_eq!(strip_index("guide/index"), "guide");
        assert_eq!(strip_index("guide"), "guide");
        assert_eq!(strip_index("reindex"), "reindex");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("a/b/c"), Some("c"));
        assert_eq!(last_segment("a"), Some("a"));
        assert_eq!(last_segment(""), None);
    }

    #[test]
    fn test_parent_slug() {
        assert_eq!(parent_slug("x/y/z"), "x/y");
        assert_eq!(parent_slug("x"), "");
        assert_eq!(parent_slug(""), "");
    }

    #[test]
    fn test_is_within_segment_boundary() {
        assert!(is_within("guides", "guides"));
        assert!(is_within("guides/intro", "guides"));
        assert!(is_within("guides/intro", "guides/"));
        assert!(!is_within("guidesx/intro", "guides"));
        assert!(!is_within("api", "guides"));
    }

    #[test]
    fn test_is_within_root() {
        assert!(is_within("anything/at/all", ""));
        assert!(is_within("index", "/"));
    }
}
