//! Error types for request composition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, encoding or signing a request.
///
/// None of these are retryable: they either describe a caller bug
/// ([`CompositionError::InvalidDescriptor`]) or a configuration problem the
/// caller must resolve before composing again.
#[derive(Error, Debug)]
pub enum CompositionError {
    /// The request shape is malformed or contradictory.
    #[error("invalid request descriptor: {0}")]
    InvalidDescriptor(String),
    /// Signed mode was requested but no usable key is available.
    #[error("a security key is required to compose signed URLs")]
    MissingKey,
    /// A key file was named but could not be read.
    #[error("failed to read security key from {}: {source}", path.display())]
    KeyReadFailure {
        /// The key file that was named.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The signature bytes could not be represented as URL-safe text.
    #[error("failed to encode signature: {0}")]
    EncodingFailure(String),
    /// A token did not carry a valid signature for its canonical path.
    #[error("token signature does not match its canonical path")]
    InvalidSignature,
}

impl CompositionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor(reason.into())
    }
}
