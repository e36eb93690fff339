//! Gateway error taxonomy.

use std::path::PathBuf;

/// Result alias for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the gateway before (or instead of) streaming.
///
/// Provider failures during a stream are never returned through this type;
/// they are delivered in-band as a single error token (see
/// [`crate::stream::error_text`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A prompt or message did not match any recognized shape.
    #[error("unsupported prompt format: {0}")]
    UnsupportedPromptFormat(String),

    /// A local image path does not resolve to a regular file.
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// A local image exists but could not be read.
    #[error("failed to read image {}", path.display())]
    ImageUnreadable {
        /// The offending path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The selected backend has no usable configuration.
    #[error("backend '{backend}' not initialized: {reason}")]
    BackendNotInitialized {
        /// Backend name as written in the configuration.
        backend: &'static str,
        /// What is missing.
        reason: String,
    },

    /// The underlying generation call failed.
    #[error("provider call failed: {0:#}")]
    ProviderCallFailure(#[from] anyhow::Error),
}
