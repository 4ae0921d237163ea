//! Source file classification for document discovery.

use std::path::{Component, Path};

/// File extensions recognized as document sources.
pub(crate) const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Check whether a file name has a content extension.
pub(crate) fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| CONTENT_EXTENSIONS.contains(&e))
}

/// Convert a collection-relative file path to a document id.
///
/// Strips the extension and folds directory indexes into their directory,
/// keeping `index` for the collection root:
///
/// - `index.md` → `"index"`
/// - `guide.md` → `"guide"`
/// - `guide/index.md` → `"guide"`
/// - `guide/setup.mdx` → `"guide/setup"`
///
/// Windows separators are normalized by walking path components.
/// Returns `None` if the path has no usable components.
pub(crate) fn file_path_to_id(rel_path: &Path) -> Option<String> {
    let stem_path = rel_path.with_extension("");
    let parts: Vec<String> = stem_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    match parts.as_slice() {
        [] => None,
        [only] => Some(only.clone()),
        [dirs @ .., last] if last == "index" => Some(dirs.join("/")),
        all => Some(all.join("/")),
    }
}
