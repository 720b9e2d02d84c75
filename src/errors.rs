//! Error types for the engine fetcher
//!
//! This module defines error types for all components of the crate. Errors
//! are designed to be actionable and provide clear context for debugging and
//! user feedback.
//!
//! A note on races: a publish rename that fails only because the target file
//! already exists is *not* represented here. The cache is keyed by content
//! hash, so losing that race means another process published equivalent
//! content; the cache swallows it as success.

use std::path::PathBuf;
use thiserror::Error;

/// Download and HTTP transport errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request failed
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// I/O error while writing the downloaded bytes
    #[error("File I/O error")]
    Io(#[from] std::io::Error),

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// API paths are resolved against a base URL and must be absolute
    #[error("URL path must start with slash: {path}")]
    MissingLeadingSlash { path: String },

    /// Server returned a non-success status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },
}

/// Cache management errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache directory could not be created or accessed
    #[error("Cache directory not accessible: {path}")]
    DirectoryNotAccessible { path: PathBuf },

    /// Temporary file creation failed
    #[error("Failed to create temp file in {path}")]
    TempFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The injected downloader failed; fatal to the current call, not retried
    #[error("Failed to download {filename}")]
    TransferFailed {
        filename: String,
        #[source]
        source: DownloadError,
    },

    /// Downloaded content does not match the expected hash. The offending
    /// bytes remain at `path` for inspection; they are never published.
    #[error("Hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        expected: String,
        actual: String,
        path: PathBuf,
    },

    /// Hash algorithm name not recognized
    #[error("Unsupported hash algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    /// Could not move the verified temp file to its final cache location
    #[error("Failed to publish {temp_path} to {final_path}")]
    PublishFailed {
        temp_path: PathBuf,
        final_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O error during a cache operation
    #[error("Cache I/O error")]
    Io(#[from] std::io::Error),
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// An entry would resolve outside the extraction target. Treated as a
    /// security violation, not a plain I/O failure.
    #[error("Extracting an entry outside the target directory is not allowed: {entry}")]
    PathTraversal { entry: String },

    /// Entry carries a mode outside the 9 permission bits
    #[error("Invalid file mode '{mode:o}'. File mode must be between 0 and 0o777")]
    InvalidFileMode { mode: u32 },

    /// Directory creation failed during extraction
    #[error("Error creating directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// ZIP container error
    #[error("ZIP archive error")]
    Zip(#[from] zip::result::ZipError),

    /// Generic I/O error during extraction
    #[error("Extraction I/O error")]
    Io(#[from] std::io::Error),
}

/// Top-level error that can represent any component failure
#[derive(Error, Debug)]
pub enum AppError {
    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Cache error
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Extraction error
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Download(_) => "download",
            AppError::Cache(_) => "cache",
            AppError::Extract(_) => "extract",
            AppError::Io(_) => "io",
        }
    }

    /// Whether this error signals tampered or corrupted content rather than
    /// an environmental failure
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            AppError::Cache(CacheError::HashMismatch { .. })
                | AppError::Extract(ExtractError::PathTraversal { .. })
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Cache result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Extraction result type alias
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
