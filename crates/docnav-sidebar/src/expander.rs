//! Declared item → resolved entry.

use docnav_content::{ContentStore, Document, parent_slug};
use futures::future::{BoxFuture, try_join_all};

use crate::autogroup::GroupTable;
use crate::badge::format_badge;
use crate::context::ResolveContext;
use crate::entry::{GroupEntry, LinkEntry, SidebarEntry};
use crate::error::SidebarError;
use crate::item::{AutogenerateGroup, ExternalLink, ManualGroup, SidebarItem, SlugLink};
use crate::linker::link_entry;
use crate::resolver::ResolverOptions;
use crate::routing::LocaleRouting;

/// Slug tried last when walking up for `::back`.
const ROOT_SLUG: &str = "index";

/// Collaborators borrowed for one render.
#[derive(Clone, Copy)]
pub(crate) struct Expander<'a> {
    pub store: &'a dyn ContentStore,
    pub routing: &'a dyn LocaleRouting,
    pub options: &'a ResolverOptions,
}

impl<'a> Expander<'a> {
    /// Expand one item, recursing into manual groups.
    ///
    /// Boxed because manual groups recurse.
    pub fn expand_item(
        self,
        item: &'a SidebarItem,
        ctx: &'a ResolveContext,
    ) -> BoxFuture<'a, Result<SidebarEntry, SidebarError>> {
        Box::pin(async move {
            match item {
                SidebarItem::Slug(link) => self.expand_slug(link, ctx).await,
                SidebarItem::Link(link) => Ok(external_link(link, ctx)),
                SidebarItem::Autogenerate(auto) => self.expand_autogenerate(auto, ctx).await,
                SidebarItem::Group(group) => self.expand_group(group, ctx).await,
            }
        })
    }

    async fn expand_slug(
        self,
        link: &'a SlugLink,
        ctx: &'a ResolveContext,
    ) -> Result<SidebarEntry, SidebarError> {
        let document = if link.is_back() {
            self.find_ancestor(&ctx.config_slug).await?
        } else {
            let slug = link.slug.trim_matches('/');
            self.store
                .get_entry(&self.options.collection, slug)
                .await?
                .ok_or_else(|| SidebarError::EntryNotFound {
                    slug: slug.to_owned(),
                })?
        };
        Ok(SidebarEntry::Link(link_entry(
            Some(link),
            &document,
            ctx,
            self.routing,
        )))
    }

    /// Nearest document strictly above `config_slug`, `index` last.
    async fn find_ancestor(self, config_slug: &str) -> Result<Document, SidebarError> {
        let mut slug = config_slug.to_owned();
        loop {
            let parent = parent_slug(&slug);
            slug = if parent.is_empty() {
                ROOT_SLUG.to_owned()
            } else {
                parent.to_owned()
            };

            tracing::debug!(slug = %slug, "Looking up back link target");
            if let Some(document) = self
                .store
                .get_entry(&self.options.collection, &slug)
                .await?
            {
                return Ok(document);
            }
            if slug == ROOT_SLUG {
                return Err(SidebarError::EntryNotFound { slug });
            }
        }
    }

    async fn expand_autogenerate(
        self,
        auto: &'a AutogenerateGroup,
        ctx: &'a ResolveContext,
    ) -> Result<SidebarEntry, SidebarError> {
        let directory = auto.directory.as_str();
        let documents = self
            .store
            .get_directory(&self.options.collection, directory)
            .await?;
        tracing::debug!(
            directory,
            document_count = documents.len(),
            "Autogenerating group"
        );

        let collapsed = auto
            .collapsed
            .unwrap_or(self.options.autogenerate_collapsed);
        GroupTable::build(&documents, directory).expand(directory, ctx, self.routing, collapsed)
    }

    async fn expand_group(
        self,
        group: &'a ManualGroup,
        ctx: &'a ResolveContext,
    ) -> Result<SidebarEntry, SidebarError> {
        let entries =
            try_join_all(group.items.iter().map(|item| self.expand_item(item, ctx))).await?;
        Ok(SidebarEntry::Group(GroupEntry {
            label: group.label_for(&ctx.locale).to_owned(),
            collapsed: group.collapsed,
            badge: format_badge(group.badge.as_ref()),
            entries,
        }))
    }
}

fn external_link(link: &ExternalLink, ctx: &ResolveContext) -> SidebarEntry {
    SidebarEntry::Link(LinkEntry {
        label: link.label_for(&ctx.locale).to_owned(),
        href: link.link.clone(),
        is_current: false,
        badge: format_badge(link.badge.as_ref()),
        attrs: link.attrs.clone(),
    })
}
