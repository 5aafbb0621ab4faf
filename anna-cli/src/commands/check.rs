//! Ingest a site and report what was found.

use super::{load_site, SiteArgs};
use anyhow::Result;

pub fn check_site(args: &SiteArgs, json: bool) -> Result<()> {
    let ctx = load_site(args)?;
    let stats = ctx.stats();

    if json {
        let payload = serde_json::json!({
            "site": ctx.config().site_title,
            "stats": stats,
            "tags": ctx.tags().keys().map(|k| k.name()).collect::<Vec<_>>(),
            "collections": ctx.collections().keys().map(|k| k.name()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let title = &ctx.config().site_title;
    if title.is_empty() {
        println!("Site at {}", args.root.display());
    } else {
        println!("Site '{}' at {}", title, args.root.display());
    }
    println!("  {} pages, {} posts", stats.pages, stats.posts);
    println!("  {} notes, {} backlinks", stats.notes, stats.backlinks);
    println!("  {} tags, {} collections", stats.tags, stats.collections);

    let heads = ctx.head_notes();
    if !heads.is_empty() {
        println!("Note index:");
        for note in heads {
            println!("- {} ({})", note.title(), note.url);
        }
    }

    Ok(())
}
