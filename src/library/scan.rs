//! Background metadata extraction for a whole library.
//!
//! Extraction is strictly read-only and per-file, so files are processed on
//! a rayon pool with no shared mutable state; completed records are handed
//! to the consumer over an mpsc channel. A scan observes a cancellation
//! flag before each file: cancelling stops the batch promptly, and items
//! already delivered remain valid.

use crate::fb2;
use crate::library::book::BookRecord;
use crate::library::find_books;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

/// How much of each file a scan extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Only the display title, for responsive tree population.
    TitleOnly,
    /// The complete record, cover and reading text included.
    Full,
}

/// One completed extraction, delivered through the scan channel.
#[derive(Debug)]
pub struct ScanItem {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Extracted record (title-only in [`ScanMode::TitleOnly`]).
    pub record: BookRecord,
}

/// Control handle for an in-flight scan.
pub struct ScanHandle {
    cancel: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request cancellation. Workers check the flag before each file.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Block until the scan thread has finished.
    pub fn wait(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Library scanner with a bounded worker pool.
#[derive(Debug, Clone)]
pub struct Scanner {
    workers: usize,
}

impl Scanner {
    /// Create a scanner running at most `workers` extractions in parallel.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Start scanning a directory in the background.
    ///
    /// Returns the receiving end of the result channel and a handle for
    /// cancellation. The channel closes once the scan finishes or is
    /// cancelled. Starting a new scan for a new root supersedes an old one
    /// by cancelling its handle.
    pub fn start(&self, root: &Path, mode: ScanMode) -> (Receiver<ScanItem>, ScanHandle) {
        let files = find_books(root);
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = channel();

        let flag = cancel.clone();
        let workers = self.workers;
        let root = root.to_path_buf();
        let thread = std::thread::spawn(move || run_scan(&root, files, mode, workers, &flag, tx));

        (
            rx,
            ScanHandle {
                cancel,
                thread: Some(thread),
            },
        )
    }
}

fn run_scan(
    root: &Path,
    files: Vec<PathBuf>,
    mode: ScanMode,
    workers: usize,
    cancel: &AtomicBool,
    tx: Sender<ScanItem>,
) {
    let start = std::time::Instant::now();
    let total = files.len();
    tracing::info!(root = %root.display(), files = total, workers, "Scanning library");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().unwrap());

    let processed = AtomicUsize::new(0);

    pool.install(|| {
        files.par_iter().for_each_with(tx, |tx, path| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }

            let record = match mode {
                ScanMode::TitleOnly => {
                    let mut record = BookRecord::new(path);
                    record.title = fb2::extract_title(path);
                    record
                }
                ScanMode::Full => fb2::extract_full(path),
            };

            // The receiver may be gone already; that just ends delivery.
            let _ = tx.send(ScanItem {
                path: path.clone(),
                record,
            });

            let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
            if done.is_multiple_of(100) || done == total {
                tracing::info!("Processing... {}/{}", done, total);
            }
        });
    });

    tracing::info!(
        processed = processed.load(Ordering::Relaxed),
        total,
        cancelled = cancel.load(Ordering::Relaxed),
        elapsed = ?start.elapsed(),
        "Library scan finished"
    );
}
