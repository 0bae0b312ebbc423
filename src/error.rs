//! Error types for the editing engine.
//!
//! Every error here is recoverable: the editing session keeps running and the
//! in-memory configuration stays valid.

use thiserror::Error;

/// Reasons a sync code could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DecodeError {
    #[error("Not a sync code: expected it to start with \"PW\"")]
    MissingPrefix,

    #[error("Unsupported sync code version: {0}")]
    UnsupportedVersion(String),

    #[error("Sync code is malformed: {0}")]
    Malformed(&'static str),

    #[error("Sync code payload is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("Sync code checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Sync code does not contain a valid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Failures of the durable key-value store.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons an image could not be turned into a content reference.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum IngestError {
    #[error("'{file_name}' is empty")]
    Empty { file_name: String },

    #[error("'{file_name}' is not an image (detected {mime})")]
    NotAnImage { file_name: String, mime: String },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors reported by [`crate::editor::Editor`].
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum EditorError {
    #[error("Nothing to restore: history is empty")]
    NothingToRestore,

    #[error("No drag in progress")]
    NoActiveDrag,

    #[error("Drag offset must be a finite number, got ({dx}, {dy})")]
    NonFiniteOffset { dx: f64, dy: f64 },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),

    /// The edit was applied in memory but could not be persisted.
    #[error("Change kept in memory but not saved: {0}")]
    Storage(#[from] StorageError),
}
