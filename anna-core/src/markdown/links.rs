//! Pluggable strategies for finding note references in a markdown body.

use super::{markdown_options, wikilinks::find_wikilinks};
use crate::config::LinkSyntax;
use pulldown_cmark::{Event, LinkType, Parser, Tag, TagEnd};

/// Finds the raw targets a note body refers to
///
/// Targets are returned unresolved, in document order, duplicates included.
/// Deciding which of them name a known note is the resolver's job.
pub trait ReferencePattern: Send + Sync {
    fn extract(&self, markdown: &str) -> Vec<String>;
}

/// `[[target]]` references, ignoring code spans and code blocks
#[derive(Debug, Default, Clone, Copy)]
pub struct WikilinkPattern;

/// Inline markdown links with a relative destination, `[text](other.html)`
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownLinkPattern;

/// Wikilinks and markdown links, in document order
#[derive(Debug, Default, Clone, Copy)]
pub struct AnyPattern;

impl ReferencePattern for WikilinkPattern {
    fn extract(&self, markdown: &str) -> Vec<String> {
        scan(markdown, true, false)
    }
}

impl ReferencePattern for MarkdownLinkPattern {
    fn extract(&self, markdown: &str) -> Vec<String> {
        scan(markdown, false, true)
    }
}

impl ReferencePattern for AnyPattern {
    fn extract(&self, markdown: &str) -> Vec<String> {
        scan(markdown, true, true)
    }
}

/// Pattern implementing the given link syntax
pub fn pattern_for(syntax: LinkSyntax) -> Box<dyn ReferencePattern> {
    match syntax {
        LinkSyntax::Wikilink => Box::new(WikilinkPattern),
        LinkSyntax::Markdown => Box::new(MarkdownLinkPattern),
        LinkSyntax::Any => Box::new(AnyPattern),
    }
}

fn scan(markdown: &str, wikilinks: bool, markdown_links: bool) -> Vec<String> {
    let mut targets = Vec::new();
    let mut in_code_block = false;
    // Consecutive text events are merged so a `[[...]]` split by the parser
    // around its brackets is still seen whole.
    let mut pending_text = String::new();

    let flush = |pending: &mut String, targets: &mut Vec<String>| {
        if wikilinks && pending.contains("[[") {
            targets.extend(find_wikilinks(pending).into_iter().map(|l| l.target.to_string()));
        }
        pending.clear();
    };

    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut pending_text, &mut targets);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if !in_code_block => pending_text.push_str(&text),
            Event::Start(Tag::Link {
                link_type, dest_url, ..
            }) => {
                flush(&mut pending_text, &mut targets);
                if markdown_links && is_internal(link_type, &dest_url) {
                    targets.push(dest_url.to_string());
                }
            }
            _ => flush(&mut pending_text, &mut targets),
        }
    }
    flush(&mut pending_text, &mut targets);

    targets
}

fn is_internal(link_type: LinkType, dest: &str) -> bool {
    if matches!(link_type, LinkType::Autolink | LinkType::Email) {
        return false;
    }
    let dest = dest.trim();
    !(dest.is_empty()
        || dest.starts_with('#')
        || dest.starts_with("//")
        || dest.contains("://")
        || dest.starts_with("mailto:")
        || dest.starts_with("tel:")
        || dest.starts_with("data:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wikilink_pattern_keeps_duplicates_in_order() {
        let found = WikilinkPattern.extract("see [[N2]] and [[N1]] and [[N2]] again");
        assert_eq!(found, vec!["N2", "N1", "N2"]);
    }

    #[test]
    fn test_wikilink_pattern_skips_code() {
        let md = "Real [[alpha]].\n\n```\n[[not-a-link]]\n```\n\nInline `[[nope]]` too.";
        assert_eq!(WikilinkPattern.extract(md), vec!["alpha"]);
    }

    #[test]
    fn test_wikilink_across_emphasis_is_not_merged() {
        // Text separated by markup must not fuse into a fake link.
        let md = "[[open *emph* close]]";
        assert!(WikilinkPattern.extract(md).is_empty());
    }

    #[test]
    fn test_markdown_link_pattern() {
        let md = "A [local](other.html), a [source](../notes/b.md), \
                  an [external](https://example.com), a [section](#top) \
                  and <https://auto.example>.";
        assert_eq!(
            MarkdownLinkPattern.extract(md),
            vec!["other.html", "../notes/b.md"]
        );
    }

    #[test]
    fn test_any_pattern_document_order() {
        let md = "[first](a.html) then [[second]] then [third](c.md)";
        assert_eq!(AnyPattern.extract(md), vec!["a.html", "second", "c.md"]);
    }

    #[test]
    fn test_pattern_for_syntax() {
        let md = "[[wiki]] and [md](md.html)";
        assert_eq!(pattern_for(LinkSyntax::Wikilink).extract(md), vec!["wiki"]);
        assert_eq!(pattern_for(LinkSyntax::Markdown).extract(md), vec!["md.html"]);
    }
}
