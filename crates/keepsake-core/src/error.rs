//! Error types for Keepsake core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and hints.

use thiserror::Error;

/// Result type alias for Keepsake operations.
pub type Result<T> = std::result::Result<T, KeepsakeError>;

/// Core error type for Keepsake operations.
#[derive(Debug, Error)]
pub enum KeepsakeError {
    /// Incorrect passphrase during decryption
    #[error("Incorrect passphrase")]
    IncorrectPassphrase,

    /// Payload is missing the content-type/ciphertext separator or the
    /// content type carries an embedded line break
    #[error("Malformed payload: {0}")]
    Format(String),

    /// Encryption or decryption error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Any failed call to the remote object store (network, auth, missing
    /// object). Uniform and terminal; callers do not retry.
    #[error("Remote store error: {0}")]
    RemoteStore(String),

    /// A name could not be resolved to a stored object
    #[error("Not found: {0}")]
    NotFound(String),

    /// User declined to supply a passphrase
    #[error("Cancelled")]
    Cancelled,

    /// Credential is missing, stale, or unusable
    #[error("Credential error: {0}")]
    Credential(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
