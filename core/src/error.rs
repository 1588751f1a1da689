//! Error types for the PetFriends client.
//!
//! # Design
//! HTTP status codes are never errors here: 400 and 403 responses come back
//! as `ApiResponse` values so callers can assert on them directly. `ApiError`
//! covers only what happens on this side of the wire.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by `PetFriends` calls and typed body extraction.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// A photo file could not be read from disk.
    #[error("cannot read photo {}: {source}", path.display())]
    PhotoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
