use thiserror::Error;

/// Main error type for the crate.
///
/// Metadata extraction never produces these: it is total and degrades to a
/// sparse [`crate::BookRecord`] instead. Errors surface only from the
/// cache codec, where I/O and malformed JSON genuinely fail.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected or unusable cache file.
    #[error("Cache error: {0}")]
    Cache(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
