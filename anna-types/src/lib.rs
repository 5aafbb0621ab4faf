//! Shared types for anna
//!
//! This crate provides the identifier types used across the anna workspace:
//! the site-unique URL key every content item is stored under, and the
//! bucket keys of the tag and collection indices.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Site-relative URL of a rendered content item (e.g. `posts/hello.html`)
///
/// Never carries a leading slash; path segments are always separated by `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentUrl(pub String);

impl ContentUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// URL without its final extension (`notes/a.html` -> `notes/a`)
    pub fn without_extension(&self) -> &str {
        let (dir_end, name) = match self.0.rfind('/') {
            Some(idx) => (idx + 1, &self.0[idx + 1..]),
            None => (0, self.0.as_str()),
        };
        match name.rfind('.') {
            Some(dot) if dot > 0 => &self.0[..dir_end + dot],
            _ => &self.0,
        }
    }

    /// Directory part of the URL, empty for top-level items
    pub fn parent(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Final path segment without extension (`notes/a.html` -> `a`)
    pub fn file_stem(&self) -> &str {
        let base = self.without_extension();
        match base.rfind('/') {
            Some(idx) => &base[idx + 1..],
            None => base,
        }
    }
}

impl fmt::Display for ContentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentUrl {
    fn from(url: &str) -> Self {
        ContentUrl(url.to_string())
    }
}

impl From<String> for ContentUrl {
    fn from(url: String) -> Self {
        ContentUrl(url)
    }
}

impl Borrow<str> for ContentUrl {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContentUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Key of a tag or collection bucket (`tags/rust`, `collections/series`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketKey(String);

impl BucketKey {
    pub const TAG_PREFIX: &'static str = "tags/";
    pub const COLLECTION_PREFIX: &'static str = "collections/";

    pub fn tag(tag: &str) -> Self {
        Self(format!("{}{}", Self::TAG_PREFIX, tag))
    }

    pub fn collection(name: &str) -> Self {
        Self(format!("{}{}", Self::COLLECTION_PREFIX, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag or collection name without its prefix
    pub fn name(&self) -> &str {
        self.0
            .strip_prefix(Self::TAG_PREFIX)
            .or_else(|| self.0.strip_prefix(Self::COLLECTION_PREFIX))
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BucketKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
