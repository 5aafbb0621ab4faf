//! Site configuration parsing and ingestion options.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Site-wide settings read from `layout/config.yml`
///
/// The ingestion engine never interprets these values; they travel with the
/// merged context so the rendering stage can use them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub navbar: Vec<String>,

    #[serde(rename = "baseURL", default)]
    pub base_url: String,

    #[serde(rename = "siteTitle", default)]
    pub site_title: String,

    #[serde(rename = "siteScripts", default)]
    pub site_scripts: Vec<String>,

    #[serde(default)]
    pub author: String,

    #[serde(rename = "themeURL", default)]
    pub theme_url: String,
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Load the config file if it exists, falling back to defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("No site config at {:?}; using defaults", path);
            return Ok(Self::default());
        }
        Self::from_file(path)
    }
}

/// Syntax recognised as a reference from one note to another
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSyntax {
    /// `[[target]]`, `[[target|label]]`
    #[default]
    Wikilink,
    /// Inline markdown links with relative targets, `[label](other.html)`
    Markdown,
    /// Either of the above
    Any,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown link syntax '{0}' (expected wikilink, markdown or any)")]
pub struct UnknownLinkSyntax(pub String);

impl FromStr for LinkSyntax {
    type Err = UnknownLinkSyntax;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wikilink" | "wiki" => Ok(LinkSyntax::Wikilink),
            "markdown" | "md" => Ok(LinkSyntax::Markdown),
            "any" | "all" => Ok(LinkSyntax::Any),
            _ => Err(UnknownLinkSyntax(s.to_string())),
        }
    }
}

/// Options fixed by the caller before ingestion begins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Keep draft posts in the chronological list
    pub include_drafts: bool,

    /// File extensions treated as content sources (without the dot)
    pub source_extensions: Vec<String>,

    /// Extension swapped in when computing URLs (without the dot)
    pub output_extension: String,

    /// Directory names never descended into
    pub ignored_dirs: Vec<String>,

    pub link_syntax: LinkSyntax,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            include_drafts: false,
            source_extensions: vec!["md".to_string()],
            output_extension: "html".to_string(),
            ignored_dirs: vec![".obsidian".to_string()],
            link_syntax: LinkSyntax::default(),
        }
    }
}

impl IngestOptions {
    pub fn with_drafts(mut self, include_drafts: bool) -> Self {
        self.include_drafts = include_drafts;
        self
    }

    pub fn is_source_extension(&self, ext: &str) -> bool {
        self.source_extensions.iter().any(|e| e == ext)
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }
}
