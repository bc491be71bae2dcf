//! Persisted tree/progress cache.
//!
//! The on-disk format is a single JSON file recording the library root,
//! one entry per book (path relative to the root, display title, progress
//! ratio) and a small UI state blob:
//!
//! ```json
//! {
//!   "root_path": "/home/user/books",
//!   "books": [
//!     { "rel_path": "sf/verne/island.fb2", "title": "The Mysterious Island", "progress": 0.42 }
//!   ],
//!   "ui": { "is_maximized": false, "splitter_sizes": [280, 720] }
//! }
//! ```
//!
//! Loading reconstructs the folder tree purely from the recorded relative
//! paths, synthesizing directories as needed, and restores each book's
//! progress keyed by absolute path. It never re-scans the disk.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// The whole persisted cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeCache {
    /// Absolute path of the library root directory.
    pub root_path: PathBuf,

    /// One entry per book, tree order.
    pub books: Vec<CachedBook>,

    /// Window/splitter state of the UI shell.
    #[serde(default)]
    pub ui: UiState,
}

/// One persisted book entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedBook {
    /// Path relative to the library root.
    pub rel_path: PathBuf,

    /// Display title shown in the tree.
    pub title: String,

    /// Reading progress ratio in [0, 1].
    #[serde(default)]
    pub progress: f64,
}

/// UI state persisted alongside the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    /// Whether the window was maximized.
    #[serde(default)]
    pub is_maximized: bool,

    /// Recorded splitter pane sizes.
    #[serde(default)]
    pub splitter_sizes: Vec<i32>,
}

impl UiState {
    /// Splitter sizes, applied only when exactly two panes were recorded.
    pub fn splitter_pair(&self) -> Option<(i32, i32)> {
        match self.splitter_sizes.as_slice() {
            [left, right] => Some((*left, *right)),
            _ => None,
        }
    }
}

/// A synthesized directory in the reconstructed tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderNode {
    /// Directory name (library root basename at the top).
    pub name: String,

    /// Subdirectories, in order of first appearance.
    pub folders: Vec<FolderNode>,

    /// Books directly in this directory, source order.
    pub books: Vec<TreeBook>,
}

/// A book leaf in the reconstructed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeBook {
    /// Display title (falls back to the file name when absent).
    pub title: String,

    /// Absolute path of the book file.
    pub path: PathBuf,
}

impl FolderNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            folders: Vec::new(),
            books: Vec::new(),
        }
    }

    /// Find or synthesize a direct subfolder.
    fn subfolder_mut(&mut self, name: &str) -> &mut FolderNode {
        let pos = match self.folders.iter().position(|f| f.name == name) {
            Some(pos) => pos,
            None => {
                self.folders.push(FolderNode::new(name));
                self.folders.len() - 1
            }
        };
        &mut self.folders[pos]
    }
}

impl TreeCache {
    /// Load and validate a cache file.
    ///
    /// A cache whose recorded root is no longer an existing directory is
    /// rejected, since every restored path would dangle.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cache: TreeCache = serde_json::from_str(&content)?;

        if !cache.root_path.is_dir() {
            tracing::warn!(root = %cache.root_path.display(), "Cached library root no longer exists");
            return Err(AppError::Cache(format!(
                "root path is not a directory: {}",
                cache.root_path.display()
            )));
        }

        Ok(cache)
    }

    /// Write the cache file (pretty-printed, like the historical format).
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Restored progress ratios keyed by absolute book path, clamped to
    /// [0, 1]. Entries with an empty relative path are dropped.
    pub fn progress_map(&self) -> HashMap<PathBuf, f64> {
        self.books
            .iter()
            .filter(|b| !b.rel_path.as_os_str().is_empty())
            .map(|b| (self.root_path.join(&b.rel_path), b.progress.clamp(0.0, 1.0)))
            .collect()
    }

    /// Reconstruct the folder tree from the recorded relative paths.
    ///
    /// Directories are synthesized on first sight and keep the order in
    /// which the book list introduces them; no disk access happens here.
    pub fn folder_tree(&self) -> FolderNode {
        let root_name = self
            .root_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root_path.display().to_string());
        let mut root = FolderNode::new(&root_name);

        for book in &self.books {
            let parts: Vec<String> = book
                .rel_path
                .components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect();

            let Some((file_name, folders)) = parts.split_last() else {
                continue;
            };

            let mut node = &mut root;
            for folder in folders {
                node = node.subfolder_mut(folder);
            }

            let title = if book.title.trim().is_empty() {
                file_name.clone()
            } else {
                book.title.clone()
            };

            node.books.push(TreeBook {
                title,
                path: self.root_path.join(&book.rel_path),
            });
        }

        root
    }
}
