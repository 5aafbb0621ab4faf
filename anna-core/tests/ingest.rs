//! On-disk ingestion of a complete site directory.

use anna_core::{BuildError, IngestOptions, SiteBuilder};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, contents: &str) -> std::io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

fn site() -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    write(
        root,
        "layout/config.yml",
        r#"
navbar:
  - index
  - posts
baseURL: "https://example.com/"
siteTitle: "Example"
author: "Ada"
"#,
    )?;
    write(
        root,
        "content/index.md",
        "---\ntitle: Home\ntype: page\ntags: [intro]\n---\n# Welcome\n",
    )?;
    write(
        root,
        "content/posts/new.md",
        "---\ntitle: New\ntype: post\ndate: 2024-01-01\ntags: [rust, intro]\ncollections: [series]\n---\nNew post\n",
    )?;
    write(
        root,
        "content/posts/old.md",
        "---\ntitle: Old\ntype: post\ndate: 2023-01-01\ndraft: true\n---\nOld post\n",
    )?;
    write(
        root,
        "content/notes/N1.md",
        "---\ntitle: N1\ntype: note\nhead: true\n---\nsee [[N2]]\n",
    )?;
    write(root, "content/notes/N2.md", "---\ntitle: N2\ntype: note\n---\nno links\n")?;
    write(
        root,
        "content/notes/N3.md",
        "---\ntitle: N3\ntype: note\n---\n[[N2]] then [[N2]] again\n",
    )?;
    write(root, "content/README.md", "# Not content\n")?;
    write(root, "content/untitled.md", "---\ntype: page\n---\nbody\n")?;
    write(root, "content/static/style.css", "body {}\n")?;
    write(
        root,
        "content/.obsidian/workspace.md",
        "---\ntitle: Hidden\ntype: page\n---\n",
    )?;

    Ok(dir)
}

#[test]
fn test_builds_site_from_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = site()?;
    let ctx = SiteBuilder::default().build_dir(dir.path())?;

    assert_eq!(ctx.config().site_title, "Example");
    assert_eq!(ctx.config().navbar, vec!["index", "posts"]);

    let urls: Vec<_> = ctx.items().keys().map(|u| u.as_str()).collect();
    assert_eq!(urls, vec!["index.html", "posts/new.html"]);

    let posts: Vec<_> = ctx.posts().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(posts, vec!["posts/new.html"]);
    assert_eq!(ctx.posts()[0].date, 1_704_067_200);

    let intro: Vec<_> = ctx.tagged("intro").iter().map(|i| i.url.as_str()).collect();
    assert_eq!(intro, vec!["index.html", "posts/new.html"]);
    assert_eq!(ctx.in_collection("series").len(), 1);

    let home = ctx.item("index.html").ok_or("missing index")?;
    assert!(home.body_html.contains("<h1>Welcome</h1>"));
    assert_eq!(home.source_path, Path::new("index.md"));

    Ok(())
}

#[test]
fn test_drafts_included_on_request() -> Result<(), Box<dyn std::error::Error>> {
    let dir = site()?;
    let ctx = SiteBuilder::new(IngestOptions::default().with_drafts(true)).build_dir(dir.path())?;

    let posts: Vec<_> = ctx.posts().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(posts, vec!["posts/new.html", "posts/old.html"]);

    Ok(())
}

#[test]
fn test_note_backlinks_on_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = site()?;
    let ctx = SiteBuilder::default().build_dir(dir.path())?;

    assert_eq!(ctx.notes().len(), 3);
    assert!(ctx.item("notes/N1.html").is_none());

    let n2 = ctx.note("notes/N2.html").ok_or("missing N2")?;
    let sources: Vec<_> = n2.backlinks.iter().map(|u| u.as_str()).collect();
    assert_eq!(sources, vec!["notes/N1.html", "notes/N3.html"]);
    assert_eq!(n2.excerpt, "no links");

    let n3 = ctx.note("notes/N3.html").ok_or("missing N3")?;
    assert_eq!(n3.linked_note_urls.len(), 1);

    let heads: Vec<_> = ctx.head_notes().iter().map(|n| n.url.as_str()).collect();
    assert_eq!(heads, vec!["notes/N1.html"]);

    let stats = ctx.stats();
    assert_eq!(stats.notes, 3);
    assert_eq!(stats.backlinks, 2);

    Ok(())
}

#[test]
fn test_missing_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "content/a.md", "---\ntitle: A\ntype: page\n---\n")?;

    let ctx = SiteBuilder::default().build_dir(dir.path())?;
    assert_eq!(ctx.config().site_title, "");
    assert_eq!(ctx.items().len(), 1);

    Ok(())
}

#[test]
fn test_missing_content_dir_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let err = SiteBuilder::default().build_dir(dir.path()).unwrap_err();
    assert!(matches!(err, BuildError::Tree { .. }));

    Ok(())
}

#[test]
fn test_bad_sources_abort_the_build() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(
        dir.path(),
        "content/bad.md",
        "---\ntitle: Bad\ntype: post\ndate: yesterday\n---\n",
    )?;
    let err = SiteBuilder::default().build_dir(dir.path()).unwrap_err();
    assert!(matches!(err, BuildError::Classify { .. }));
    assert!(err.to_string().contains("bad.md"));

    let dir = tempdir()?;
    write(dir.path(), "content/broken.md", "---\ntitle: \"unterminated\n---\n")?;
    let err = SiteBuilder::default().build_dir(dir.path()).unwrap_err();
    assert!(matches!(err, BuildError::Parse { .. }));

    let dir = tempdir()?;
    write(dir.path(), "content/a.md", "---\ntitle: A\n---\n")?;
    write(dir.path(), "layout/config.yml", "navbar: {not: a list}\n")?;
    let err = SiteBuilder::default().build_dir(dir.path()).unwrap_err();
    assert!(matches!(err, BuildError::Config(_)));

    Ok(())
}

#[test]
fn test_duplicate_url_across_extensions() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "content/a.md", "---\ntitle: A\ntype: page\n---\n")?;
    write(dir.path(), "content/a.markdown", "---\ntitle: B\ntype: page\n---\n")?;

    // Only `.md` is a source by default, so there is no clash.
    assert_eq!(SiteBuilder::default().build_dir(dir.path())?.items().len(), 1);

    let options = IngestOptions {
        source_extensions: vec!["md".into(), "markdown".into()],
        ..IngestOptions::default()
    };
    let err = SiteBuilder::new(options).build_dir(dir.path()).unwrap_err();
    assert!(matches!(err, BuildError::Index(_)));
    assert!(err.to_string().contains("a.html"));

    Ok(())
}
