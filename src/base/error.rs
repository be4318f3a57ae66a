//! Error types for the wire boundary.

use thiserror::Error;

/// Errors raised while decoding or encoding model descriptions.
///
/// Only the wire boundary can fail. Directive parsing and key sanitization
/// are total and never produce a `ModelError`.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The package description is not a valid envelope.
    #[error("malformed package description: {0}")]
    Decode(#[source] serde_json::Error),

    /// The outer plugin request object is malformed.
    #[error("malformed plugin request: {0}")]
    Request(#[source] serde_json::Error),

    /// The request payload is not valid base64.
    #[error("request payload is not valid base64: {0}")]
    Payload(#[from] base64::DecodeError),

    /// The serializer rejected a model value.
    #[error("failed to encode package description: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ModelError {
    /// Whether this error came from reading input (as opposed to writing output).
    pub fn is_decode(&self) -> bool {
        !matches!(self, ModelError::Encode(_))
    }
}

/// Result alias used across the crate.
pub type Result<T, E = ModelError> = std::result::Result<T, E>;
