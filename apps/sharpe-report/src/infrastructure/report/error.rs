//! Report writer errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing report artifacts.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("Failed to write '{}'", path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// JSON serialization failure.
    #[error("Failed to serialize report")]
    Serialize(#[from] serde_json::Error),
}
