//! Book metadata model.

use std::path::{Path, PathBuf};

/// Metadata extracted from a single FB2 file.
///
/// A record is always producible for any input path: on parse failure only
/// `title` is populated (from the filename) and every other field stays
/// absent. Callers typically cache records keyed by absolute path.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    /// Path to the source file.
    pub path: PathBuf,

    /// Display title (filename stem when the document has none).
    pub title: String,

    /// Author display names, source order (may be empty).
    pub authors: Vec<String>,

    /// Genre tags, source order, blanks dropped.
    pub genres: Vec<String>,

    /// Publisher name from the publish-info block.
    pub publisher: Option<String>,

    /// Publication year, falling back to the title-info date.
    pub date: Option<String>,

    /// Language code (e.g. "ru", "en").
    pub language: Option<String>,

    /// Annotation paragraphs joined with a blank line.
    pub description: Option<String>,

    /// Decoded embedded cover image, if present and decodable.
    pub cover: Option<Vec<u8>>,

    /// Every body paragraph joined with a blank line; absent when the
    /// document has no paragraphs at all.
    pub full_text: Option<String>,
}

impl BookRecord {
    /// Create a degraded record carrying only the filename-derived title.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            title: Self::file_stem(path),
            authors: Vec::new(),
            genres: Vec::new(),
            publisher: None,
            date: None,
            language: None,
            description: None,
            cover: None,
            full_text: None,
        }
    }

    /// Filename without extension, the universal title fallback.
    pub fn file_stem(path: &Path) -> String {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string()
    }

    /// Get display name for authors.
    pub fn authors_display(&self) -> String {
        if self.authors.is_empty() {
            "Unknown Author".to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// The text a reading session should open: the full body text, falling
    /// back to the annotation, else empty.
    pub fn reading_text(&self) -> &str {
        self.full_text
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("")
    }

    /// Get the path relative to a library root.
    pub fn relative_path(&self, library_root: &Path) -> Option<PathBuf> {
        self.path.strip_prefix(library_root).ok().map(PathBuf::from)
    }
}
