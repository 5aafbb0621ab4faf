//! Frontmatter splitting from markdown files.

use crate::models::Frontmatter;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();
static TITLE_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A\x{feff}?---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)(.*)\z").unwrap()
    })
}

fn title_regex() -> &'static Regex {
    TITLE_REGEX.get_or_init(|| Regex::new(r"(?m)^[ \t]*title[ \t]*:").unwrap())
}

/// Split frontmatter from markdown content
///
/// Returns `Ok(None)` when the file has no complete `---` block at its start
/// or when the block lacks a `title` field; such files are not content.
/// Anything after the closing marker is the body, including later `---` lines.
///
/// # Example
///
/// ```
/// use anna_core::frontmatter::split_frontmatter;
///
/// let content = "---\ntitle: My Post\ndate: 2025-01-01\n---\n# Hello World\n";
///
/// let (fm, body) = split_frontmatter(content).unwrap().unwrap();
/// assert_eq!(fm.title, "My Post");
/// assert_eq!(fm.date, Some("2025-01-01".to_string()));
/// assert!(body.starts_with("# Hello World"));
/// ```
pub fn split_frontmatter(content: &str) -> Result<Option<(Frontmatter, String)>, FrontmatterError> {
    let Some(captures) = frontmatter_regex().captures(content) else {
        return Ok(None);
    };

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    if !title_regex().is_match(yaml) {
        return Ok(None);
    }

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml)?;
    Ok(Some((frontmatter, body.to_string())))
}
