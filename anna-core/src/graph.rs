//! Note link graph: forward links and backlinks between notes.
//!
//! Linking runs in two passes once every note is known. The first pass
//! resolves each note's own references into forward links; the second derives
//! backlinks from the completed forward-link set. Keeping the passes apart means
//! a note referencing one that was walked later is never missed.

use crate::index::Notes;
use crate::markdown::ReferencePattern;
use crate::slug::slugify;
use anna_types::ContentUrl;
use std::collections::{BTreeMap, HashMap};

/// Reverse adjacency: note URL -> URLs of the notes referencing it
///
/// Every known note has an entry, empty when nothing links to it.
pub type LinkStore = BTreeMap<ContentUrl, Vec<ContentUrl>>;

/// Maps reference targets found in note bodies to known note URLs
#[derive(Debug, Default)]
pub struct NoteResolver {
    /// URL without extension -> URL
    by_path: HashMap<String, ContentUrl>,
    /// Slug of file stem or title -> URL; stems take precedence
    by_slug: HashMap<String, ContentUrl>,
}

impl NoteResolver {
    pub fn new(notes: &Notes) -> Self {
        let mut resolver = Self::default();

        for url in notes.keys() {
            resolver
                .by_path
                .insert(url.without_extension().to_string(), url.clone());
        }
        for url in notes.keys() {
            let slug = slugify(url.file_stem());
            if !slug.is_empty() {
                resolver.by_slug.entry(slug).or_insert_with(|| url.clone());
            }
        }
        for (url, note) in notes {
            let slug = slugify(note.title());
            if !slug.is_empty() {
                resolver.by_slug.entry(slug).or_insert_with(|| url.clone());
            }
        }

        resolver
    }

    /// Resolve `target` as written in the body of the note at `source`
    ///
    /// Tries, in order: a root-relative path (leading `/`), a path relative to
    /// the source note's directory, a path from the content root, the slug of
    /// the whole target, and the slug of its last path segment. Extensions are
    /// ignored when matching paths.
    pub fn resolve(&self, source: &ContentUrl, target: &str) -> Option<ContentUrl> {
        let target = target
            .split(['#', '?'])
            .next()
            .unwrap_or_default()
            .trim();
        if target.is_empty() {
            return None;
        }

        let mut candidates = Vec::new();
        if let Some(rooted) = target.strip_prefix('/') {
            candidates.push(normalize_path("", rooted));
        } else {
            candidates.push(normalize_path(source.parent(), target));
            candidates.push(normalize_path("", target));
        }

        for candidate in candidates.into_iter().flatten() {
            if let Some(url) = self.by_path.get(strip_extension(&candidate)) {
                return Some(url.clone());
            }
        }

        let last_segment = target.rsplit('/').next().unwrap_or(target);
        [slugify(target), slugify(strip_extension(last_segment))]
            .into_iter()
            .filter(|slug| !slug.is_empty())
            .find_map(|slug| self.by_slug.get(&slug).cloned())
    }
}

/// Resolve `.` and `..` segments of `path` joined onto `base`
///
/// Returns `None` when `..` would climb above the content root.
fn normalize_path(base: &str, path: &str) -> Option<String> {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

/// Notes with their forward links and backlinks populated
#[derive(Debug, Clone, Default)]
pub struct NoteGraph {
    pub notes: Notes,
    pub link_store: LinkStore,
}

impl NoteGraph {
    /// URLs of the notes referencing `url`
    pub fn backlinks(&self, url: &str) -> &[ContentUrl] {
        self.link_store
            .get(url)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// URLs `url` references
    pub fn outgoing(&self, url: &str) -> &[ContentUrl] {
        self.notes
            .get(url)
            .map(|n| n.linked_note_urls.as_slice())
            .unwrap_or_default()
    }
}

/// Builds the note graph from the complete notes collection
pub struct NoteGraphBuilder<'p> {
    pattern: &'p dyn ReferencePattern,
}

impl<'p> NoteGraphBuilder<'p> {
    pub fn new(pattern: &'p dyn ReferencePattern) -> Self {
        Self { pattern }
    }

    pub fn build(&self, mut notes: Notes) -> NoteGraph {
        let forward = self.forward_links(&notes);
        let link_store = backlinks_from(&notes, &forward);

        for (url, note) in notes.iter_mut() {
            if let Some(targets) = forward.get(url) {
                note.linked_note_urls = targets.clone();
            }
            if let Some(sources) = link_store.get(url) {
                note.backlinks = sources.clone();
            }
        }

        let edge_count: usize = link_store.values().map(Vec::len).sum();
        tracing::debug!(
            "Linked {} notes with {} backlink edges",
            notes.len(),
            edge_count
        );

        NoteGraph { notes, link_store }
    }

    /// Pass 1: each note's distinct, resolvable targets in document order
    fn forward_links(&self, notes: &Notes) -> BTreeMap<ContentUrl, Vec<ContentUrl>> {
        let resolver = NoteResolver::new(notes);

        notes
            .iter()
            .map(|(url, note)| {
                let mut targets: Vec<ContentUrl> = Vec::new();
                for raw in self.pattern.extract(&note.raw_body) {
                    match resolver.resolve(url, &raw) {
                        Some(target) if !targets.contains(&target) => targets.push(target),
                        Some(_) => {}
                        None => tracing::debug!("{}: unresolved note reference '{}'", url, raw),
                    }
                }
                (url.clone(), targets)
            })
            .collect()
    }
}

/// Pass 2: reverse the forward links, skipping self references
fn backlinks_from(notes: &Notes, forward: &BTreeMap<ContentUrl, Vec<ContentUrl>>) -> LinkStore {
    let mut store: LinkStore = notes.keys().map(|url| (url.clone(), Vec::new())).collect();

    for (source, targets) in forward {
        for target in targets {
            if target == source {
                continue;
            }
            let sources = store.entry(target.clone()).or_default();
            if !sources.contains(source) {
                sources.push(source.clone());
            }
        }
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{MarkdownLinkPattern, WikilinkPattern};
    use crate::models::{Frontmatter, Note};
    use std::path::PathBuf;

    fn note(url: &str, title: &str, body: &str) -> Note {
        Note {
            url: ContentUrl::from(url),
            date: 0,
            frontmatter: Frontmatter {
                title: title.to_string(),
                content_type: Some("note".into()),
                ..Frontmatter::default()
            },
            body_html: String::new(),
            raw_body: body.to_string(),
            excerpt: String::new(),
            source_path: PathBuf::from(url),
            linked_note_urls: vec![],
            backlinks: vec![],
        }
    }

    fn notes(list: Vec<Note>) -> Notes {
        list.into_iter().map(|n| (n.url.clone(), n)).collect()
    }

    fn urls(list: &[ContentUrl]) -> Vec<&str> {
        list.iter().map(ContentUrl::as_str).collect()
    }

    #[test]
    fn test_backlinks_collapse_duplicates() {
        let graph = NoteGraphBuilder::new(&WikilinkPattern).build(notes(vec![
            note("N1.html", "N1", "see [[N2]]"),
            note("N2.html", "N2", "no links"),
            note("N3.html", "N3", "see [[N2]] and [[N2]] again"),
        ]));

        assert_eq!(urls(graph.backlinks("N2.html")), vec!["N1.html", "N3.html"]);
        assert!(graph.backlinks("N1.html").is_empty());
        assert!(graph.backlinks("N3.html").is_empty());
        assert_eq!(urls(graph.outgoing("N3.html")), vec!["N2.html"]);
        assert_eq!(graph.link_store.len(), 3);

        let n2 = &graph.notes["N2.html"];
        assert_eq!(urls(&n2.backlinks), vec!["N1.html", "N3.html"]);
    }

    #[test]
    fn test_self_links_are_not_backlinks() {
        let graph = NoteGraphBuilder::new(&WikilinkPattern).build(notes(vec![
            note("a.html", "A", "I am [[a]] and I link [[b]]"),
            note("b.html", "B", "back to [[a]]"),
        ]));

        assert_eq!(urls(graph.backlinks("a.html")), vec!["b.html"]);
        assert_eq!(urls(graph.backlinks("b.html")), vec!["a.html"]);
        assert_eq!(urls(graph.outgoing("a.html")), vec!["a.html", "b.html"]);
    }

    #[test]
    fn test_unknown_targets_are_ignored() {
        let graph = NoteGraphBuilder::new(&WikilinkPattern).build(notes(vec![note(
            "a.html",
            "A",
            "[[ghost]] and [[missing/path]]",
        )]));

        assert!(graph.outgoing("a.html").is_empty());
        assert!(graph.backlinks("a.html").is_empty());
    }

    #[test]
    fn test_backlinks_independent_of_insertion_order() {
        let first = NoteGraphBuilder::new(&WikilinkPattern).build(notes(vec![
            note("z.html", "Z", "[[a]]"),
            note("a.html", "A", "[[z]]"),
            note("m.html", "M", "[[a]]"),
        ]));
        let second = NoteGraphBuilder::new(&WikilinkPattern).build(notes(vec![
            note("m.html", "M", "[[a]]"),
            note("a.html", "A", "[[z]]"),
            note("z.html", "Z", "[[a]]"),
        ]));

        assert_eq!(first.link_store, second.link_store);
        assert_eq!(urls(first.backlinks("a.html")), vec!["m.html", "z.html"]);
    }

    #[test]
    fn test_resolver_strategies() {
        let all = notes(vec![
            note("notes/rust-safety.html", "Memory Model Basics", ""),
            note("notes/deep/ownership.html", "Ownership", ""),
            note("index.html", "Home", ""),
        ]);
        let resolver = NoteResolver::new(&all);
        let source = ContentUrl::from("notes/deep/ownership.html");

        let resolve = |target: &str| resolver.resolve(&source, target).map(|u| u.0);

        assert_eq!(resolve("../rust-safety.md").as_deref(), Some("notes/rust-safety.html"));
        assert_eq!(resolve("/notes/rust-safety").as_deref(), Some("notes/rust-safety.html"));
        assert_eq!(resolve("notes/rust-safety.html#intro").as_deref(), Some("notes/rust-safety.html"));
        assert_eq!(resolve("Rust Safety").as_deref(), Some("notes/rust-safety.html"));
        assert_eq!(resolve("memory model basics").as_deref(), Some("notes/rust-safety.html"));
        assert_eq!(resolve("ownership").as_deref(), Some("notes/deep/ownership.html"));
        assert_eq!(resolve("../../index.html").as_deref(), Some("index.html"));
        assert_eq!(resolve("../../../escape").as_deref(), None);
        assert_eq!(resolve("#only-fragment"), None);
        assert_eq!(resolve("unknown"), None);
    }

    #[test]
    fn test_markdown_link_pattern_graph() {
        let graph = NoteGraphBuilder::new(&MarkdownLinkPattern).build(notes(vec![
            note("notes/a.html", "A", "see [b](b.html) and [ext](https://x.org)"),
            note("notes/b.html", "B", "plain"),
        ]));

        assert_eq!(urls(graph.backlinks("notes/b.html")), vec!["notes/a.html"]);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("notes", "a").as_deref(), Some("notes/a"));
        assert_eq!(normalize_path("notes/deep", "../a").as_deref(), Some("notes/a"));
        assert_eq!(normalize_path("", "./a/./b").as_deref(), Some("a/b"));
        assert_eq!(normalize_path("", "../a"), None);
        assert_eq!(strip_extension("notes/a.html"), "notes/a");
        assert_eq!(strip_extension("v1.2/a"), "v1.2/a");
    }
}
