//! Error types for latch.
//!
//! Uses thiserror for derive macros. Contention is never an error: a lock
//! held by another actor is reported through the protect outcome instead.

use thiserror::Error;

/// Main error type for latch operations.
#[derive(Error, Debug)]
pub enum LatchError {
    /// A lock value could not be constructed (e.g. empty actor).
    #[error("Invalid lock: {0}")]
    InvalidLock(String),

    /// The underlying storage medium could not be read or written.
    #[error("Lock store failure: {0}")]
    Store(String),

    /// Persisted lock data could not be decoded or encoded.
    #[error("Malformed lock data: {0}")]
    Serialisation(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LatchError {
    /// Whether the error originates from the storage medium or its contents.
    pub fn is_store_fault(&self) -> bool {
        matches!(self, LatchError::Store(_) | LatchError::Serialisation(_))
    }
}

/// Result type alias for latch operations.
pub type Result<T> = std::result::Result<T, LatchError>;
