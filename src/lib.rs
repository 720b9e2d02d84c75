//! Engine Fetcher Library
//!
//! Fetches named, versioned engine bundles from a remote server, verifies
//! them by cryptographic hash, stores them in a content-addressed cache
//! shared across process invocations, and safely extracts archival bundles.
//! Repeated invocations of a calling tool avoid redundant network transfer,
//! and a corrupted or tampered download is never silently used.
//!
//! Cross-process safety rests entirely on filesystem-atomic operations
//! (atomic rename, idempotent directory creation); there are no locks and no
//! coordination service.

pub mod app;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
