//! YAML frontmatter parsing for filesystem documents.

use serde_json::{Map, Value};

/// Frontmatter delimiter line.
const DELIMITER: &str = "---";

/// Split a document into its frontmatter block and body.
///
/// The frontmatter must start on the first line with `---` and end with a
/// line containing only `---`. Returns `(None, content)` when there is no
/// well-formed block.
pub(crate) fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content
        .strip_prefix(DELIMITER)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse a frontmatter block into a JSON object.
///
/// Empty blocks produce an empty map.
///
/// # Errors
///
/// Returns an error message if the YAML is malformed or is not a mapping.
pub(crate) fn parse_frontmatter(yaml: &str) -> Result<Map<String, Value>, String> {
    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| format!("Invalid YAML: {e}"))?;
    match serde_json::to_value(value).map_err(|e| format!("Unsupported YAML value: {e}"))? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err("Frontmatter must be a mapping".to_owned()),
    }
}
