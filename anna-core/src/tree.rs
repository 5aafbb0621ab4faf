//! Content tree abstraction: directory listings and raw file bytes.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("No such entry: {0}")]
    NotFound(PathBuf),
}

/// One child of a directory, addressed relative to the tree root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub rel_path: PathBuf,
    pub is_dir: bool,
}

impl TreeEntry {
    pub fn file_name(&self) -> &str {
        self.rel_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> Option<&str> {
        self.rel_path.extension().and_then(|e| e.to_str())
    }
}

/// A tree of content files
///
/// Paths are relative to the tree root; the empty path is the root itself.
pub trait ContentTree {
    /// Direct children of `dir`, sorted by file name
    fn read_dir(&self, dir: &Path) -> Result<Vec<TreeEntry>, TreeError>;

    /// Raw bytes of the regular file at `path`
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, TreeError>;
}

/// Content tree rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FsTree {
    root: PathBuf,
}

impl FsTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentTree for FsTree {
    fn read_dir(&self, dir: &Path) -> Result<Vec<TreeEntry>, TreeError> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(self.root.join(dir))
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let file_type = entry.file_type();
            if !file_type.is_dir() && !file_type.is_file() {
                tracing::debug!("Skipping special file {:?}", entry.path());
                continue;
            }

            let rel_path = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            entries.push(TreeEntry {
                rel_path,
                is_dir: file_type.is_dir(),
            });
        }

        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, TreeError> {
        let full = self.root.join(path);
        std::fs::read(&full).map_err(|source| TreeError::Io { path: full, source })
    }
}

/// In-memory content tree; directories are implied by file paths
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        self.files
            .insert(normalize(path.as_ref()), contents.into());
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl ContentTree for MemoryTree {
    fn read_dir(&self, dir: &Path) -> Result<Vec<TreeEntry>, TreeError> {
        let dir = normalize(dir);
        let mut children: BTreeMap<String, bool> = BTreeMap::new();

        for path in self.files.keys() {
            let Ok(rest) = path.strip_prefix(&dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let is_dir = components.next().is_some();
            *children.entry(name).or_insert(false) |= is_dir;
        }

        if children.is_empty() && !dir.as_os_str().is_empty() {
            return Err(TreeError::NotFound(dir));
        }

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| TreeEntry {
                rel_path: dir.join(name),
                is_dir,
            })
            .collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, TreeError> {
        let path = normalize(path);
        self.files
            .get(&path)
            .cloned()
            .ok_or(TreeError::NotFound(path))
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}
