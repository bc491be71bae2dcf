//! Interactive reading session for a single open book.
//!
//! One book is active at a time: opening another book means building a new
//! session, which orphans any layout tokens issued by the old one. Within
//! a session, resize events are coalesced through a generation counter so
//! a burst of re-pagination requests runs only once, for the newest
//! metrics, always re-deriving the page index from the stored ratio.

use crate::library::book::BookRecord;
use crate::paginator::{PageSet, ViewportMetrics};
use std::path::{Path, PathBuf};

/// Token identifying one layout request. Only the newest token of a
/// session still applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutToken(u64);

/// Reading state for one open book.
#[derive(Debug, Clone)]
pub struct ReaderSession {
    path: PathBuf,
    text: String,
    metrics: ViewportMetrics,
    pages: PageSet,
    ratio: f64,
    layout_generation: u64,
    pending_metrics: Option<ViewportMetrics>,
}

impl ReaderSession {
    /// Open a book at a stored progress ratio.
    ///
    /// The session reads the record's full text, falling back to the
    /// annotation when the body produced none; an entirely textless book
    /// opens as a single empty page.
    pub fn open(record: &BookRecord, metrics: ViewportMetrics, initial_ratio: f64) -> Self {
        let text = record.reading_text().to_string();
        let pages = PageSet::paginate(&text, metrics, initial_ratio);
        let ratio = pages.ratio();

        Self {
            path: record.path.clone(),
            text,
            metrics,
            pages,
            ratio,
            layout_generation: 0,
            pending_metrics: None,
        }
    }

    /// Path of the open book.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current page set.
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    /// Metrics of the last applied layout.
    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    /// Progress ratio to persist for this book.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Text of the current page.
    pub fn current_page(&self) -> &str {
        self.pages.current_page()
    }

    /// Record a viewport change and get a token for the deferred
    /// re-pagination. A newer request supersedes every earlier token.
    pub fn request_layout(&mut self, metrics: ViewportMetrics) -> LayoutToken {
        self.layout_generation += 1;
        self.pending_metrics = Some(metrics);
        LayoutToken(self.layout_generation)
    }

    /// Run the re-pagination for a token.
    ///
    /// Returns false without touching the page set when the token has been
    /// superseded or already applied. On success the page index is derived
    /// from the stored ratio, not carried over, since page boundaries
    /// shift with capacity.
    pub fn apply_layout(&mut self, token: LayoutToken) -> bool {
        if token.0 != self.layout_generation {
            tracing::debug!(
                token = token.0,
                newest = self.layout_generation,
                "Stale layout request skipped"
            );
            return false;
        }
        let Some(metrics) = self.pending_metrics.take() else {
            return false;
        };

        self.metrics = metrics;
        self.pages = PageSet::paginate(&self.text, metrics, self.ratio);
        self.ratio = self.pages.ratio();
        true
    }

    /// Jump to a page index, clamped, and update the stored ratio.
    pub fn go_to_page(&mut self, index: usize) {
        self.pages.go_to(index);
        self.ratio = self.pages.ratio();
    }

    /// Jump to a 1-based page number, clamped.
    pub fn go_to_display_page(&mut self, page: usize) {
        self.pages.go_to_display_page(page);
        self.ratio = self.pages.ratio();
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(&mut self) {
        self.pages.next();
        self.ratio = self.pages.ratio();
    }

    /// Go back one page; no-op on the first page.
    pub fn previous_page(&mut self) {
        self.pages.previous();
        self.ratio = self.pages.ratio();
    }
}
