//! # anna-core
//!
//! Content ingestion and cross-reference engine for the anna static site
//! generator.
//!
//! This crate walks a content tree, splits each source into frontmatter and
//! body, classifies it as a page, post or note, builds the site indices and
//! the note backlink graph, and merges everything into one [`SiteContext`].

pub mod builder;
pub mod classify;
pub mod config;
pub mod context;
pub mod date;
pub mod frontmatter;
pub mod graph;
pub mod index;
pub mod markdown;
pub mod models;
pub mod slug;
pub mod tree;

pub use builder::{BuildError, SiteBuilder};
pub use config::{IngestOptions, LinkSyntax, SiteConfig, UnknownLinkSyntax};
pub use context::{ContextStats, SiteContext};
pub use graph::{LinkStore, NoteGraph, NoteGraphBuilder};
pub use index::{IndexBuilder, SiteIndex};
pub use markdown::{CommonMarkConverter, MarkdownConverter, ReferencePattern};
pub use models::{ContentItem, ContentKind, Frontmatter, Note};
pub use slug::slugify;
pub use tree::{ContentTree, FsTree, MemoryTree};

pub use anna_types::{BucketKey, ContentUrl};
