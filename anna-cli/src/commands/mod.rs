//! CLI command implementations.

pub mod backlinks;
pub mod check;
pub mod note;
pub mod posts;

pub use backlinks::show_backlinks;
pub use check::check_site;
pub use note::show_note;
pub use posts::list_posts;

use anna_core::{IngestOptions, LinkSyntax, Note, SiteBuilder, SiteContext};
use anyhow::{Context, Result};
use chrono::DateTime;
use std::path::PathBuf;

/// Options shared by every command
pub struct SiteArgs {
    pub root: PathBuf,
    pub drafts: bool,
    pub links: LinkSyntax,
}

/// Ingest the site described by `args`
pub fn load_site(args: &SiteArgs) -> Result<SiteContext> {
    let options = IngestOptions {
        link_syntax: args.links,
        ..IngestOptions::default().with_drafts(args.drafts)
    };

    SiteBuilder::new(options)
        .build_dir(&args.root)
        .with_context(|| format!("Failed to ingest site at {}", args.root.display()))
}

/// Find a note by URL, accepting the URL without its `.html` suffix
pub fn find_note<'a>(ctx: &'a SiteContext, query: &str) -> Option<&'a Note> {
    let trimmed = query.trim().trim_start_matches('/');
    ctx.note(trimmed)
        .or_else(|| ctx.note(&format!("{trimmed}.html")))
}

/// `YYYY-MM-DD` for a timestamp, empty when undated
pub fn format_date(timestamp: i64) -> String {
    if timestamp == 0 {
        return String::new();
    }
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
