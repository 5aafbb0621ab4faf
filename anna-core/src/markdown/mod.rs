//! Markdown conversion and plain-text extraction.

pub mod links;
pub mod wikilinks;

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

pub use links::{AnyPattern, MarkdownLinkPattern, ReferencePattern, WikilinkPattern};

/// Maximum length of a note excerpt, in characters
pub const EXCERPT_LIMIT: usize = 200;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Markdown conversion failed: {0}")]
    Failed(String),
}

/// Converts a markdown body into HTML
///
/// Site content is trusted, so implementations must pass raw HTML through.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError>;
}

/// CommonMark converter backed by pulldown-cmark
pub struct CommonMarkConverter {
    options: Options,
}

impl CommonMarkConverter {
    pub fn new() -> Self {
        Self {
            options: markdown_options(),
        }
    }
}

impl Default for CommonMarkConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter for CommonMarkConverter {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError> {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        Ok(html_output)
    }
}

/// Parser options shared by conversion and reference scanning
pub(crate) fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Extract the readable text of a markdown body
///
/// Markup and raw HTML are dropped, whitespace runs collapse to one space and
/// control characters are removed.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::BlockQuote(_)
                | TagEnd::TableCell,
            ) => text.push(' '),
            Event::Start(Tag::Item) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain-text preview of a note body, at most `limit` characters
///
/// Truncation never splits a grapheme cluster; whitespace and control
/// characters are stripped from both ends of the result.
pub fn excerpt(markdown: &str, limit: usize) -> String {
    let text = plain_text(markdown);
    let text = trim_edges(&text);

    let mut out = String::new();
    let mut count = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme.chars().count();
        if count + width > limit {
            break;
        }
        out.push_str(grapheme);
        count += width;
    }

    trim_edges(&out).to_string()
}

fn trim_edges(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let converter = CommonMarkConverter::new();
        let html = converter.convert("# Hello World\n\nThis is a **test**.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<strong>test</strong>"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let converter = CommonMarkConverter::new();
        let html = converter
            .convert("# Notes\n\nSee <span class=\"x\">raw</span> html.")
            .unwrap();
        insta::assert_snapshot!(html, @r#"
        <h1>Notes</h1>
        <p>See <span class="x">raw</span> html.</p>
        "#);
    }

    #[test]
    fn test_tables() {
        let converter = CommonMarkConverter::new();
        let md = "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |\n";
        let html = converter.convert(md).unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Header 1</th>"));
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let md = "# Title\n\nSome *emphasis* and `code`.\n\n<div>hidden</div>\n\n- one\n- two\n";
        assert_eq!(plain_text(md), "Title Some emphasis and code. one two");
    }

    #[test]
    fn test_excerpt_trims_edges() {
        let md = "\n\n\tIndented start\t\n\n";
        let text = excerpt(md, EXCERPT_LIMIT);
        assert!(!text.starts_with(['\n', '\t', ' ']));
        assert!(!text.ends_with(['\n', '\t', ' ']));
        assert!(text.contains("Indented start"));
    }

    #[test]
    fn test_excerpt_is_capped() {
        let md = "word ".repeat(100);
        let text = excerpt(&md, EXCERPT_LIMIT);
        assert!(text.chars().count() <= EXCERPT_LIMIT);
        assert!(text.starts_with("word word"));
        assert!(!text.ends_with(' '));
    }

    #[test]
    fn test_excerpt_respects_graphemes() {
        let md = "e\u{301}".repeat(150);
        let text = excerpt(&md, 5);
        assert_eq!(text, "e\u{301}e\u{301}");
    }

    #[test]
    fn test_excerpt_of_empty_body() {
        assert_eq!(excerpt("", EXCERPT_LIMIT), "");
        assert_eq!(excerpt("\n\t\n", EXCERPT_LIMIT), "");
    }
}
