//! Fetch a single note in structured form.

use super::{find_note, format_date, load_site, SiteArgs};
use crate::NoteFormat;
use anna_types::ContentUrl;
use anyhow::{Context, Result};

/// Fetch a single note and print it in the requested format.
pub fn show_note(args: &SiteArgs, url: &str, format: NoteFormat, with_links: bool) -> Result<()> {
    let ctx = load_site(args)?;
    let note = find_note(&ctx, url).with_context(|| format!("Note '{}' not found", url))?;

    match format {
        NoteFormat::Json => {
            let mut payload = serde_json::json!({
                "url": note.url,
                "title": note.title(),
                "date": format_date(note.date),
                "head": note.is_head(),
                "excerpt": note.excerpt,
                "frontmatter": note.frontmatter,
                "html": note.body_html,
            });
            if with_links {
                payload["outgoing"] = serde_json::json!(urls(&note.linked_note_urls));
                payload["backlinks"] = serde_json::json!(urls(&note.backlinks));
            }
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        NoteFormat::Html => {
            println!("{}", note.body_html);
        }
        NoteFormat::Raw => {
            println!("{}", note.raw_body);
        }
    }

    Ok(())
}

fn urls(list: &[ContentUrl]) -> Vec<&str> {
    list.iter().map(ContentUrl::as_str).collect()
}
