//! List the notes referencing a note.

use super::{find_note, load_site, SiteArgs};
use anyhow::{Context, Result};

pub fn show_backlinks(args: &SiteArgs, url: &str, json: bool) -> Result<()> {
    let ctx = load_site(args)?;
    let note = find_note(&ctx, url).with_context(|| format!("Note '{}' not found", url))?;
    let sources = ctx.backlinks(note.url.as_str());

    if json {
        let payload = serde_json::json!({
            "url": note.url,
            "backlinks": sources
                .iter()
                .map(|n| serde_json::json!({
                    "url": n.url,
                    "title": n.title(),
                    "excerpt": n.excerpt,
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if sources.is_empty() {
        println!("No notes link to '{}'", note.url);
        return Ok(());
    }

    println!("Notes linking to '{}':", note.url);
    for source in sources {
        println!("- {} ({})", source.title(), source.url);
    }

    Ok(())
}
