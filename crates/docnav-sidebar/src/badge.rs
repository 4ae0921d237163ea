//! Badge normalization.

use serde::Deserialize;

use crate::entry::{Badge, BadgeVariant};

/// Badge as written in a sidebar definition.
///
/// Either `badge: New` or `badge: { text: New, variant: tip, class: pulse }`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BadgeSpec {
    Text(String),
    Structured {
        text: String,
        #[serde(default)]
        variant: Option<BadgeVariant>,
        #[serde(default)]
        class: Option<String>,
    },
}

impl From<Badge> for BadgeSpec {
    fn from(badge: Badge) -> Self {
        Self::Structured {
            text: badge.text,
            variant: Some(badge.variant),
            class: badge.class,
        }
    }
}

/// Normalize a declared badge into a display badge.
///
/// Plain text gets the `default` variant. Absent stays absent.
#[must_use]
pub fn format_badge(input: Option<&BadgeSpec>) -> Option<Badge> {
    match input? {
        BadgeSpec::Text(text) => Some(Badge {
            variant: BadgeVariant::Default,
            text: text.clone(),
            class: None,
        }),
        BadgeSpec::Structured {
            text,
            variant,
            class,
        } => Some(Badge {
            variant: variant.unwrap_or_default(),
            text: text.clone(),
            class: class.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_absent() {
        assert_eq!(format_badge(None), None);
    }

    #[test]
    fn test_format_text() {
        let input = BadgeSpec::Text("New".to_owned());

        assert_eq!(
            format_badge(Some(&input)),
            Some(Badge {
                variant: BadgeVariant::Default,
                text: "New".to_owned(),
                class: None,
            })
        );
    }

    #[test]
    fn test_format_structured_defaults_variant() {
        let input: BadgeSpec = serde_yaml::from_str("{ text: Beta, class: pulse }").unwrap();

        let badge = format_badge(Some(&input)).unwrap();

        assert_eq!(badge.variant, BadgeVariant::Default);
        assert_eq!(badge.text, "Beta");
        assert_eq!(badge.class.as_deref(), Some("pulse"));
    }

    #[test]
    fn test_format_is_idempotent() {
        let inputs = [
            BadgeSpec::Text("New".to_owned()),
            BadgeSpec::Structured {
                text: "Deprecated".to_owned(),
                variant: Some(BadgeVariant::Danger),
                class: Some("strike".to_owned()),
            },
            BadgeSpec::Structured {
                text: "Plain".to_owned(),
                variant: None,
                class: None,
            },
        ];

        for input in &inputs {
            let once = format_badge(Some(input));
            let twice = format_badge(once.clone().map(BadgeSpec::from).as_ref());
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_deserialize_text_shorthand() {
        let input: BadgeSpec = serde_yaml::from_str("New").unwrap();
        assert_eq!(input, BadgeSpec::Text("New".to_owned()));
    }

    #[test]
    fn test_deserialize_unknown_variant_fails() {
        let result: Result<BadgeSpec, _> = serde_yaml::from_str("{ text: X, variant: loud }");
        assert!(result.is_err());
    }
}
