//! Content model structs for pages, posts, and notes.

use anna_types::ContentUrl;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of content declared by the `type` field of the frontmatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Page,
    Note,
    /// Missing or unrecognised type; the file is left to the asset copier
    Asset,
}

impl ContentKind {
    /// Exact, case-sensitive match on the declared `type`
    pub fn from_type(declared: Option<&str>) -> Self {
        match declared {
            Some("post") => ContentKind::Post,
            Some("page") => ContentKind::Page,
            Some("note") => ContentKind::Note,
            _ => ContentKind::Asset,
        }
    }
}

/// Frontmatter metadata from markdown files
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub draft: bool,

    #[serde(rename = "type")]
    #[serde(default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub layout: Option<String>,

    #[serde(rename = "scripts")]
    #[serde(default)]
    pub js_files: Vec<String>,

    #[serde(rename = "previewimage")]
    #[serde(default)]
    pub preview_image: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub collections: Vec<String>,

    #[serde(default)]
    pub authors: Vec<String>,

    /// Marks a note as an entry point of the note index
    #[serde(default)]
    pub head: bool,
}

impl Frontmatter {
    pub fn kind(&self) -> ContentKind {
        ContentKind::from_type(self.content_type.as_deref())
    }
}

/// A page or post, indexed by URL, tag, and collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Site-unique URL key (e.g., "posts/hello.html")
    pub url: ContentUrl,

    /// Either [`ContentKind::Post`] or [`ContentKind::Page`]
    pub kind: ContentKind,

    /// Publication date as a Unix timestamp, zero when absent
    pub date: i64,

    pub frontmatter: Frontmatter,

    /// Rendered HTML content
    pub body_html: String,

    /// Raw markdown body (without frontmatter)
    pub raw_body: String,

    /// Source path relative to the content root
    pub source_path: PathBuf,
}

impl ContentItem {
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    pub fn is_post(&self) -> bool {
        self.kind == ContentKind::Post
    }

    pub fn is_draft(&self) -> bool {
        self.frontmatter.draft
    }
}

/// A short free-form note taking part in the link graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub url: ContentUrl,

    /// Publication date as a Unix timestamp, zero when absent
    pub date: i64,

    pub frontmatter: Frontmatter,

    /// Rendered HTML content
    pub body_html: String,

    /// Raw markdown body (without frontmatter)
    pub raw_body: String,

    /// Plain-text preview, at most 200 characters
    pub excerpt: String,

    /// Source path relative to the content root
    pub source_path: PathBuf,

    /// Notes this note references, in document order
    pub linked_note_urls: Vec<ContentUrl>,

    /// Notes referencing this note
    pub backlinks: Vec<ContentUrl>,
}

impl Note {
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    pub fn is_head(&self) -> bool {
        self.frontmatter.head
    }
}
