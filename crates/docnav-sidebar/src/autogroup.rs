//! Auto-generated groups mirroring a content directory.
//!
//! A flat list of documents under a directory becomes a tree keyed by path
//! prefix. The table is an arena: one node per prefix, each holding the
//! indices of the prefixes one segment longer (and itself, when a document
//! lives at exactly that path). Members keep first-seen order.

use std::collections::HashMap;

use docnav_content::{Document, is_within, join_segments, last_segment, segments, strip_index};

use crate::context::ResolveContext;
use crate::entry::{GroupEntry, SidebarEntry};
use crate::error::SidebarError;
use crate::linker::link_entry;
use crate::routing::LocaleRouting;

#[derive(Debug)]
struct GroupNode {
    key: String,
    members: Vec<usize>,
}

/// Group key table for one autogenerate directive.
#[derive(Debug)]
pub(crate) struct GroupTable<'d> {
    nodes: Vec<GroupNode>,
    index: HashMap<String, usize>,
    documents: HashMap<String, &'d Document>,
}

impl<'d> GroupTable<'d> {
    /// Build the table for documents under `directory`.
    ///
    /// Document ids are keyed without their trailing `index` segment, so a
    /// directory index page sits at the directory's own key.
    pub fn build(documents: &'d [Document], directory: &str) -> Self {
        let mut table = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            documents: HashMap::new(),
        };
        let depth = segments(directory).count();

        for document in documents {
            let id = strip_index(&document.id);
            if !is_within(id, directory) {
                continue;
            }
            if table.documents.contains_key(id) {
                tracing::warn!(
                    id = %document.id,
                    "Duplicate document in autogenerated group, skipping"
                );
                continue;
            }
            table.documents.insert(id.to_owned(), document);

            let own = table.node(id);
            table.add_member(own, own);

            let parts: Vec<&str> = segments(id).collect();
            for i in depth + 1..=parts.len() {
                let key = table.node(&join_segments(&parts[..i - 1]));
                let value = table.node(&join_segments(&parts[..i]));
                table.add_member(key, value);
            }
        }

        table
    }

    fn node(&mut self, key: &str) -> usize {
        if let Some(&idx) = self.index.get(key) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(GroupNode {
            key: key.to_owned(),
            members: Vec::new(),
        });
        self.index.insert(key.to_owned(), idx);
        idx
    }

    fn add_member(&mut self, node: usize, member: usize) {
        let members = &mut self.nodes[node].members;
        if !members.contains(&member) {
            members.push(member);
        }
    }

    /// Number of group keys.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Member keys of a group key, in insertion order.
    #[cfg(test)]
    fn members(&self, key: &str) -> Option<Vec<&str>> {
        let node = &self.nodes[*self.index.get(key)?];
        Some(
            node.members
                .iter()
                .map(|&m| self.nodes[m].key.as_str())
                .collect(),
        )
    }

    /// Expand a group key into a sidebar entry.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::GroupKeyNotFound`] if the key is not in the
    /// table, which includes a directory with no documents.
    pub fn expand(
        &self,
        key: &str,
        ctx: &ResolveContext,
        routing: &dyn LocaleRouting,
        collapsed: bool,
    ) -> Result<SidebarEntry, SidebarError> {
        let idx = *self
            .index
            .get(key)
            .ok_or_else(|| SidebarError::GroupKeyNotFound {
                key: key.to_owned(),
            })?;
        Ok(self.expand_node(idx, ctx, routing, collapsed))
    }

    fn expand_node(
        &self,
        idx: usize,
        ctx: &ResolveContext,
        routing: &dyn LocaleRouting,
        collapsed: bool,
    ) -> SidebarEntry {
        let node = &self.nodes[idx];
        let fallback_label = || last_segment(&node.key).unwrap_or("index").to_owned();

        let link = if node.members.contains(&idx) {
            self.documents
                .get(&node.key)
                .map(|doc| link_entry(None, doc, ctx, routing))
        } else {
            None
        };

        if node.members.len() > 1 {
            let entries = node
                .members
                .iter()
                .map(|&member| match &link {
                    Some(link) if member == idx => SidebarEntry::Link(link.clone()),
                    _ => self.expand_node(member, ctx, routing, collapsed),
                })
                .collect();
            return SidebarEntry::Group(GroupEntry {
                label: link.map_or_else(fallback_label, |l| l.label),
                collapsed,
                badge: None,
                entries,
            });
        }

        if let Some(link) = link {
            return SidebarEntry::Link(link);
        }

        SidebarEntry::Group(GroupEntry {
            label: fallback_label(),
            collapsed,
            badge: None,
            entries: node
                .members
                .iter()
                .map(|&member| self.expand_node(member, ctx, routing, collapsed))
                .collect(),
        })
    }
}
