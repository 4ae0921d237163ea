//! Resolved sidebar tree consumed by the page-rendering layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Arbitrary HTML attributes attached to a link.
pub type Attrs = BTreeMap<String, serde_json::Value>;

/// Badge display variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Note,
    Danger,
    Success,
    Caution,
    Tip,
}

/// Display badge shown next to an entry label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub variant: BadgeVariant,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Resolved navigation link.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEntry {
    pub label: String,
    pub href: String,
    /// True if this link points at the page being rendered.
    pub is_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub attrs: Attrs,
}

/// Resolved navigation group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupEntry {
    pub label: String,
    pub collapsed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// Children in declaration (or collection iteration) order.
    pub entries: Vec<SidebarEntry>,
}

/// Renderable sidebar node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    Link(LinkEntry),
    Group(GroupEntry),
}

impl SidebarEntry {
    /// Display label of the node.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link(link) => &link.label,
            Self::Group(group) => &group.label,
        }
    }

    /// All links in this subtree, depth-first in display order.
    #[must_use]
    pub fn links(&self) -> Vec<&LinkEntry> {
        let mut out = Vec::new();
        self.collect_links(&mut out);
        out
    }

    fn collect_links<'a>(&'a self, out: &mut Vec<&'a LinkEntry>) {
        match self {
            Self::Link(link) => out.push(link),
            Self::Group(group) => {
                for entry in &group.entries {
                    entry.collect_links(out);
                }
            }
        }
    }
}
