//! Site-wide lookup structures: by URL, by tag, by collection, and posts.

use crate::models::{ContentItem, Note};
use anna_types::{BucketKey, ContentUrl};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Duplicate URL {url}: {second:?} collides with {first:?}")]
    DuplicateUrl {
        url: ContentUrl,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Notes keyed by URL, kept apart from pages and posts
pub type Notes = BTreeMap<ContentUrl, Note>;

/// Ordered buckets of items sharing a tag or collection
pub type Buckets = BTreeMap<BucketKey, Vec<Arc<ContentItem>>>;

/// Accumulates classified content during the walk
///
/// The builder is the only writer of the indices; every insertion checks the
/// URL against both pages/posts and notes so nothing is silently replaced.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    by_url: BTreeMap<ContentUrl, Arc<ContentItem>>,
    by_tag: Buckets,
    by_collection: Buckets,
    pending_posts: Vec<Arc<ContentItem>>,
    notes: Notes,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page or post to the URL map and its tag/collection buckets
    pub fn insert_item(&mut self, item: ContentItem) -> Result<(), IndexError> {
        self.check_unique(&item.url, &item.source_path)?;

        let item = Arc::new(item);
        self.by_url.insert(item.url.clone(), Arc::clone(&item));

        for tag in distinct(&item.frontmatter.tags) {
            self.by_tag
                .entry(BucketKey::tag(tag))
                .or_default()
                .push(Arc::clone(&item));
        }
        for collection in distinct(&item.frontmatter.collections) {
            self.by_collection
                .entry(BucketKey::collection(collection))
                .or_default()
                .push(Arc::clone(&item));
        }

        if item.is_post() {
            self.pending_posts.push(item);
        }

        Ok(())
    }

    /// Add a note to the notes collection
    pub fn insert_note(&mut self, note: Note) -> Result<(), IndexError> {
        self.check_unique(&note.url, &note.source_path)?;
        self.notes.insert(note.url.clone(), note);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_url.len() + self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the indices, ordering posts newest first
    ///
    /// The sort is stable: posts sharing a date keep their ingestion order.
    pub fn finish(self) -> (SiteIndex, Notes) {
        let mut posts = self.pending_posts;
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        let index = SiteIndex {
            by_url: self.by_url,
            by_tag: self.by_tag,
            by_collection: self.by_collection,
            posts,
        };
        (index, self.notes)
    }

    fn check_unique(&self, url: &ContentUrl, source: &Path) -> Result<(), IndexError> {
        let first = self
            .by_url
            .get(url)
            .map(|item| &item.source_path)
            .or_else(|| self.notes.get(url).map(|note| &note.source_path));

        match first {
            Some(first) => Err(IndexError::DuplicateUrl {
                url: url.clone(),
                first: first.clone(),
                second: source.to_path_buf(),
            }),
            None => Ok(()),
        }
    }
}

fn distinct(values: &[String]) -> impl Iterator<Item = &str> {
    let mut seen = BTreeSet::new();
    values
        .iter()
        .map(|v| v.trim())
        .filter(move |v| !v.is_empty() && seen.insert(*v))
}

/// Read-only view of the page/post indices
#[derive(Debug, Clone, Default)]
pub struct SiteIndex {
    by_url: BTreeMap<ContentUrl, Arc<ContentItem>>,
    by_tag: Buckets,
    by_collection: Buckets,
    posts: Vec<Arc<ContentItem>>,
}

impl SiteIndex {
    pub fn by_url(&self) -> &BTreeMap<ContentUrl, Arc<ContentItem>> {
        &self.by_url
    }

    pub fn by_tag(&self) -> &Buckets {
        &self.by_tag
    }

    pub fn by_collection(&self) -> &Buckets {
        &self.by_collection
    }

    /// Posts, newest first
    pub fn posts(&self) -> &[Arc<ContentItem>] {
        &self.posts
    }

    pub fn get(&self, url: &str) -> Option<&Arc<ContentItem>> {
        self.by_url.get(url)
    }

    /// Items carrying `tag`, in ingestion order
    pub fn tagged(&self, tag: &str) -> &[Arc<ContentItem>] {
        self.by_tag
            .get(BucketKey::tag(tag).as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Items listed in `collection`, in ingestion order
    pub fn in_collection(&self, collection: &str) -> &[Arc<ContentItem>] {
        self.by_collection
            .get(BucketKey::collection(collection).as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
