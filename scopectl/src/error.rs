//! Error types for `scopectl`.

use camino::Utf8PathBuf;
use scoped_config::ScopedError;
use thiserror::Error;

/// Errors surfaced by the `scopectl` pipeline.
#[derive(Debug, Error)]
pub enum ScopectlError {
    /// Building the context or resolving properties failed.
    #[error(transparent)]
    Resolve(#[from] ScopedError),

    /// JSON rendering failed.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being written.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
