//! Slug normalization for note reference lookup.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUN: OnceLock<Regex> = OnceLock::new();

/// Convert a string to a lookup slug
///
/// Lowercases, turns whitespace and underscores into hyphens, drops
/// punctuation, collapses hyphen runs and trims hyphens at both ends.
/// Note titles and file stems are compared through this form, so
/// `[[Rust Safety]]`, `[[rust_safety]]` and `[[rust-safety]]` all agree.
///
/// # Examples
///
/// ```
/// use anna_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("N2"), "n2");
/// ```
pub fn slugify(input: &str) -> String {
    let cleaned = input
        .to_lowercase()
        .graphemes(true)
        .filter_map(|g| match g {
            " " | "_" | "\t" | "\n" | "\r\n" => Some("-"),
            _ => {
                let c = g.chars().next()?;
                (c.is_alphanumeric() || c == '-').then_some(g)
            }
        })
        .collect::<String>();

    let re = HYPHEN_RUN.get_or_init(|| Regex::new(r"-+").unwrap());
    re.replace_all(&cleaned, "-").trim_matches('-').to_string()
}
