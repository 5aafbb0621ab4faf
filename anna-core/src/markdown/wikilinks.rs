//! Wikilink parsing for `[[target]]` and `[[target|text]]` syntax.

/// A single `[[...]]` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wikilink<'a> {
    /// Note being referenced, trimmed, without section or label
    pub target: &'a str,
    /// Section inside the target (`[[note#section]]`)
    pub fragment: Option<&'a str>,
    /// Display text (`[[note|text]]`)
    pub label: Option<&'a str>,
}

impl<'a> Wikilink<'a> {
    /// Parse the inside of a `[[...]]` pair
    pub fn parse(inner: &'a str) -> Option<Self> {
        let (target, label) = match inner.split_once('|') {
            Some((target, label)) => (target.trim(), Some(label.trim())),
            None => (inner.trim(), None),
        };

        let (target, fragment) = match target.split_once('#') {
            Some((base, frag)) => (base.trim(), Some(frag.trim()).filter(|f| !f.is_empty())),
            None => (target, None),
        };

        if target.is_empty() {
            return None;
        }

        Some(Self {
            target,
            fragment,
            label: label.filter(|l| !l.is_empty()),
        })
    }
}

/// Find every wikilink in a run of plain text, in order
///
/// An opening `[[` without a closing `]]` is treated as literal text.
pub fn find_wikilinks(text: &str) -> Vec<Wikilink<'_>> {
    let mut links = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("[[") {
        let after_open = &remaining[start + 2..];
        let Some(end) = after_open.find("]]") else {
            break;
        };

        if let Some(link) = Wikilink::parse(&after_open[..end]) {
            links.push(link);
        }
        remaining = &after_open[end + 2..];
    }

    links
}
