//! Chronological listing of posts.

use super::{format_date, load_site, SiteArgs};
use anyhow::Result;

pub fn list_posts(args: &SiteArgs, json: bool) -> Result<()> {
    let ctx = load_site(args)?;
    let posts = ctx.posts();

    if json {
        let payload: Vec<_> = posts
            .iter()
            .map(|post| {
                serde_json::json!({
                    "url": post.url,
                    "title": post.title(),
                    "date": format_date(post.date),
                    "draft": post.is_draft(),
                    "tags": post.frontmatter.tags,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No posts found");
        return Ok(());
    }

    for post in posts {
        let date = format_date(post.date);
        let marker = if post.is_draft() { " [draft]" } else { "" };
        if date.is_empty() {
            println!("{:10}  {}{} ({})", "undated", post.title(), marker, post.url);
        } else {
            println!("{}  {}{} ({})", date, post.title(), marker, post.url);
        }
    }

    Ok(())
}
