//! Site building logic - walks the content tree and produces the site context.

use crate::{
    classify::{Classified, Classifier, ClassifyError, ParsedSource},
    config::{ConfigError, IngestOptions, SiteConfig},
    context::SiteContext,
    frontmatter::{split_frontmatter, FrontmatterError},
    graph::NoteGraphBuilder,
    index::{IndexBuilder, IndexError},
    markdown::{links::pattern_for, CommonMarkConverter, ConvertError, MarkdownConverter, ReferencePattern},
    tree::{ContentTree, FsTree, TreeEntry, TreeError},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Content directory inside a site root
pub const CONTENT_DIR: &str = "content";

/// Site configuration file inside a site root
pub const CONFIG_PATH: &str = "layout/config.yml";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to list {path:?}: {source}")]
    Tree {
        path: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error("{path:?} is not valid UTF-8")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to classify {path:?}: {source}")]
    Classify {
        path: PathBuf,
        #[source]
        source: ClassifyError,
    },

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Split a raw source into frontmatter and body and convert the body
///
/// `Ok(None)` means the file is not content (no marker block or no title).
pub fn parse_source(
    content: &str,
    converter: &dyn MarkdownConverter,
) -> Result<Option<ParsedSource>, ParseError> {
    let Some((frontmatter, raw_body)) = split_frontmatter(content)? else {
        return Ok(None);
    };
    let body_html = converter.convert(&raw_body)?;

    Ok(Some(ParsedSource {
        frontmatter,
        raw_body,
        body_html,
    }))
}

/// Main site builder
pub struct SiteBuilder {
    options: IngestOptions,
    converter: Box<dyn MarkdownConverter>,
    pattern: Box<dyn ReferencePattern>,
}

#[derive(Debug, Default)]
struct WalkStats {
    ingested: usize,
    skipped: usize,
}

impl SiteBuilder {
    pub fn new(options: IngestOptions) -> Self {
        let pattern = pattern_for(options.link_syntax);
        Self {
            options,
            converter: Box::new(CommonMarkConverter::new()),
            pattern,
        }
    }

    /// Replace the markdown converter
    pub fn with_converter(mut self, converter: impl MarkdownConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Replace the note reference pattern chosen by the options
    pub fn with_pattern(mut self, pattern: impl ReferencePattern + 'static) -> Self {
        self.pattern = Box::new(pattern);
        self
    }

    /// Build the site found at `site_root` (`content/` plus `layout/config.yml`)
    pub fn build_dir(&self, site_root: &Path) -> Result<SiteContext, BuildError> {
        let config = SiteConfig::load_or_default(site_root.join(CONFIG_PATH))?;
        let tree = FsTree::new(site_root.join(CONTENT_DIR));
        self.build(&tree, config)
    }

    /// Build the site context from a content tree
    pub fn build(&self, tree: &dyn ContentTree, config: SiteConfig) -> Result<SiteContext, BuildError> {
        let accumulator = self.walk(tree)?;
        let (index, notes) = accumulator.finish();

        tracing::info!(
            "Indexed {} pages/posts ({} posts) and {} notes",
            index.by_url().len(),
            index.posts().len(),
            notes.len()
        );

        // Notes are linked only after the walk has seen every one of them
        let graph = NoteGraphBuilder::new(self.pattern.as_ref()).build(notes);

        Ok(SiteContext::merge(config, index, graph))
    }

    /// Depth-first walk over an explicit stack of directory listings
    ///
    /// Entries are visited in name order and a sub-directory is finished
    /// before its parent's remaining entries.
    fn walk(&self, tree: &dyn ContentTree) -> Result<IndexBuilder, BuildError> {
        let mut accumulator = IndexBuilder::new();
        let mut stats = WalkStats::default();
        let mut stack = vec![self.list(tree, Path::new(""))?.into_iter()];

        while let Some(frame) = stack.last_mut() {
            let Some(entry) = frame.next() else {
                stack.pop();
                continue;
            };

            if entry.is_dir {
                if self.options.is_ignored_dir(entry.file_name()) {
                    tracing::debug!("Ignoring directory {:?}", entry.rel_path);
                    continue;
                }
                let children = self.list(tree, &entry.rel_path)?;
                stack.push(children.into_iter());
            } else if entry
                .extension()
                .is_some_and(|ext| self.options.is_source_extension(ext))
            {
                if self.ingest_file(tree, &entry.rel_path, &mut accumulator)? {
                    stats.ingested += 1;
                } else {
                    stats.skipped += 1;
                }
            }
        }

        tracing::info!(
            "Walked content tree: {} files ingested, {} skipped",
            stats.ingested,
            stats.skipped
        );

        Ok(accumulator)
    }

    fn list(&self, tree: &dyn ContentTree, dir: &Path) -> Result<Vec<TreeEntry>, BuildError> {
        tree.read_dir(dir).map_err(|source| BuildError::Tree {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Parse, classify and index one file; returns whether it became content
    fn ingest_file(
        &self,
        tree: &dyn ContentTree,
        path: &Path,
        accumulator: &mut IndexBuilder,
    ) -> Result<bool, BuildError> {
        let bytes = tree.read_file(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|source| BuildError::Encoding {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = parse_source(&content, self.converter.as_ref()).map_err(|source| {
            BuildError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let Some(parsed) = parsed else {
            tracing::debug!("Skipping {:?}: no frontmatter block with a title", path);
            return Ok(false);
        };

        let classified = Classifier::new(&self.options)
            .classify(parsed, path)
            .map_err(|source| BuildError::Classify {
                path: path.to_path_buf(),
                source,
            })?;

        match classified {
            Classified::Post(item) | Classified::Page(item) => accumulator.insert_item(item)?,
            Classified::Note(note) => accumulator.insert_note(note)?,
            Classified::Skipped(reason) => {
                tracing::debug!("Skipping {:?}: {:?}", path, reason);
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new(IngestOptions::default())
    }
}
