//! Library models and scanning.

/// Book metadata model.
pub mod book;
/// Cancellable concurrent metadata extraction.
pub mod scan;

use crate::fb2;
use crate::library::book::BookRecord;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared cache of fully extracted records, keyed by book path.
///
/// Full extraction reads the whole document (body text included), so an
/// interactive caller extracts each book once and reuses the record for
/// the info pane and the reading session. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct RecordCache {
    records: Arc<RwLock<HashMap<PathBuf, BookRecord>>>,
}

impl RecordCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached record for a path, if any.
    pub fn get(&self, path: &Path) -> Option<BookRecord> {
        self.records.read().get(path).cloned()
    }

    /// Cached record for a path, extracting and caching on first access.
    pub fn get_or_extract(&self, path: &Path) -> BookRecord {
        if let Some(record) = self.get(path) {
            return record;
        }
        let record = fb2::extract_full(path);
        self.records
            .write()
            .insert(path.to_path_buf(), record.clone());
        record
    }

    /// Insert a record produced elsewhere (e.g. by a scan).
    pub fn insert(&self, record: BookRecord) {
        self.records.write().insert(record.path.clone(), record);
    }

    /// Drop every cached record (a new library scan starts fresh).
    pub fn clear(&self) {
        self.records.write().clear();
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// Find every FB2 file under a directory, sorted for deterministic order.
pub fn find_books(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("fb2"))
        })
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}
