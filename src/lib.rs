//! fb2shelf: a FictionBook (FB2) library engine.
//!
//! This crate provides the core of an FB2 reading application: metadata
//! extraction from FictionBook XML documents, viewport-driven text
//! pagination with a resumable reading position, and the persisted
//! tree/progress cache used to restore a library between runs.
//!
//! # Features
//!
//! - Best-effort FB2 metadata extraction (title, authors, genres,
//!   publisher, annotation, embedded cover, full reading text)
//! - Fast title-only extraction for responsive library population
//! - Word-boundary-aware pagination stable under viewport resizes
//! - Normalized progress ratio that survives re-pagination
//! - Cancellable concurrent library scanning
//! - JSON tree/progress cache compatible with the on-disk schema

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Persisted tree/progress cache codec.
pub mod cache;
/// Error types.
pub mod error;
/// FB2 document parsing and metadata extraction.
pub mod fb2;
/// Library models and scanning.
pub mod library;
/// Text pagination.
pub mod paginator;
/// Interactive reading session.
pub mod session;


pub use cache::{CachedBook, FolderNode, TreeBook, TreeCache, UiState};
pub use error::{AppError, Result};
pub use library::RecordCache;
pub use library::book::BookRecord;
pub use paginator::{PageSet, ViewportMetrics};
pub use session::ReaderSession;
