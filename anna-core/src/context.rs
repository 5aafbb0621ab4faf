//! The merged, read-only site context handed to the rendering stage.

use crate::config::SiteConfig;
use crate::graph::{LinkStore, NoteGraph};
use crate::index::{Buckets, Notes, SiteIndex};
use crate::models::{ContentItem, Note};
use anna_types::ContentUrl;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything the renderer needs, frozen after ingestion
#[derive(Debug, Clone)]
pub struct SiteContext {
    config: SiteConfig,
    index: SiteIndex,
    notes: Notes,
    link_store: LinkStore,
}

/// Entity counts of a built context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContextStats {
    pub items: usize,
    pub posts: usize,
    pub pages: usize,
    pub notes: usize,
    pub tags: usize,
    pub collections: usize,
    pub backlinks: usize,
}

impl SiteContext {
    /// Assemble the context: indices first, then the note graph
    ///
    /// No data is transformed here. Every link store key must name a known
    /// note; anything else is a bug in the graph builder.
    pub fn merge(config: SiteConfig, index: SiteIndex, graph: NoteGraph) -> Self {
        let NoteGraph { notes, link_store } = graph;

        debug_assert!(
            link_store.keys().all(|url| notes.contains_key(url)),
            "link store refers to unknown notes"
        );
        debug_assert!(
            notes.keys().all(|url| index.get(url.as_str()).is_none()),
            "note URLs overlap the page/post index"
        );

        Self {
            config,
            index,
            notes,
            link_store,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Pages and posts by URL
    pub fn items(&self) -> &BTreeMap<ContentUrl, Arc<ContentItem>> {
        self.index.by_url()
    }

    pub fn item(&self, url: &str) -> Option<&Arc<ContentItem>> {
        self.index.get(url)
    }

    pub fn tags(&self) -> &Buckets {
        self.index.by_tag()
    }

    pub fn tagged(&self, tag: &str) -> &[Arc<ContentItem>] {
        self.index.tagged(tag)
    }

    pub fn collections(&self) -> &Buckets {
        self.index.by_collection()
    }

    pub fn in_collection(&self, collection: &str) -> &[Arc<ContentItem>] {
        self.index.in_collection(collection)
    }

    /// Posts, newest first
    pub fn posts(&self) -> &[Arc<ContentItem>] {
        self.index.posts()
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    pub fn note(&self, url: &str) -> Option<&Note> {
        self.notes.get(url)
    }

    pub fn link_store(&self) -> &LinkStore {
        &self.link_store
    }

    /// Notes referencing the note at `url`
    pub fn backlinks(&self, url: &str) -> Vec<&Note> {
        self.link_store
            .get(url)
            .into_iter()
            .flatten()
            .filter_map(|source| self.notes.get(source))
            .collect()
    }

    /// Notes marked `head: true`, the entry points of the note index
    pub fn head_notes(&self) -> Vec<&Note> {
        self.notes.values().filter(|n| n.is_head()).collect()
    }

    pub fn stats(&self) -> ContextStats {
        let posts = self.index.posts().len();
        let items = self.index.by_url().len();
        ContextStats {
            items,
            posts,
            pages: self.index.by_url().values().filter(|i| !i.is_post()).count(),
            notes: self.notes.len(),
            tags: self.index.by_tag().len(),
            collections: self.index.by_collection().len(),
            backlinks: self.link_store.values().map(Vec::len).sum(),
        }
    }
}
