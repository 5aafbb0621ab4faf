//! Classification of parsed sources into pages, posts, and notes.

use crate::config::IngestOptions;
use crate::date::{timestamp_or_zero, DateError};
use crate::markdown::{excerpt, EXCERPT_LIMIT};
use crate::models::{ContentItem, ContentKind, Frontmatter, Note};
use anna_types::ContentUrl;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error("Cannot derive a URL from {0:?}")]
    EmptyUrl(PathBuf),
}

/// A source file split into metadata and body, with the body converted
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub frontmatter: Frontmatter,
    pub raw_body: String,
    pub body_html: String,
}

/// Why a well-formed source did not become content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A draft post while drafts are excluded
    Draft,
    /// `type` missing or not one of post/page/note
    UnrecognizedType(Option<String>),
}

#[derive(Debug, Clone)]
pub enum Classified {
    Post(ContentItem),
    Page(ContentItem),
    Note(Note),
    Skipped(SkipReason),
}

/// URL of a source file: its content-relative path with the extension swapped
///
/// ```
/// use anna_core::classify::content_url;
/// use std::path::Path;
///
/// let url = content_url(Path::new("posts/hello.md"), "html");
/// assert_eq!(url.as_str(), "posts/hello.html");
/// ```
pub fn content_url(rel_path: &Path, output_ext: &str) -> ContentUrl {
    let normalized: PathBuf = rel_path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    let swapped = normalized.with_extension(output_ext);

    let segments: Vec<_> = swapped
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    ContentUrl::new(segments.join("/"))
}

/// Turns parsed sources into typed content entities
pub struct Classifier<'a> {
    options: &'a IngestOptions,
}

impl<'a> Classifier<'a> {
    pub fn new(options: &'a IngestOptions) -> Self {
        Self { options }
    }

    pub fn classify(
        &self,
        parsed: ParsedSource,
        rel_path: &Path,
    ) -> Result<Classified, ClassifyError> {
        let kind = parsed.frontmatter.kind();

        let classified = match kind {
            ContentKind::Asset => {
                // Skipped files still need a valid date
                timestamp_or_zero(parsed.frontmatter.date.as_deref())?;
                Classified::Skipped(SkipReason::UnrecognizedType(
                    parsed.frontmatter.content_type,
                ))
            }
            ContentKind::Post if parsed.frontmatter.draft && !self.options.include_drafts => {
                Classified::Skipped(SkipReason::Draft)
            }
            ContentKind::Post => Classified::Post(self.item(kind, parsed, rel_path)?),
            ContentKind::Page => Classified::Page(self.item(kind, parsed, rel_path)?),
            ContentKind::Note => Classified::Note(self.note(parsed, rel_path)?),
        };

        Ok(classified)
    }

    fn locate(&self, parsed: &ParsedSource, rel_path: &Path) -> Result<(ContentUrl, i64), ClassifyError> {
        let url = content_url(rel_path, &self.options.output_extension);
        if url.is_empty() {
            return Err(ClassifyError::EmptyUrl(rel_path.to_path_buf()));
        }
        let date = timestamp_or_zero(parsed.frontmatter.date.as_deref())?;
        Ok((url, date))
    }

    fn item(
        &self,
        kind: ContentKind,
        parsed: ParsedSource,
        rel_path: &Path,
    ) -> Result<ContentItem, ClassifyError> {
        let (url, date) = self.locate(&parsed, rel_path)?;
        Ok(ContentItem {
            url,
            kind,
            date,
            frontmatter: parsed.frontmatter,
            body_html: parsed.body_html,
            raw_body: parsed.raw_body,
            source_path: rel_path.to_path_buf(),
        })
    }

    fn note(&self, parsed: ParsedSource, rel_path: &Path) -> Result<Note, ClassifyError> {
        let (url, date) = self.locate(&parsed, rel_path)?;
        Ok(Note {
            url,
            date,
            excerpt: excerpt(&parsed.raw_body, EXCERPT_LIMIT),
            frontmatter: parsed.frontmatter,
            body_html: parsed.body_html,
            raw_body: parsed.raw_body,
            source_path: rel_path.to_path_buf(),
            linked_note_urls: Vec::new(),
            backlinks: Vec::new(),
        })
    }
}
