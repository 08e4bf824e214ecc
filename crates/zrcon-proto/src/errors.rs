//! Decoding errors.

use thiserror::Error;

/// Errors produced while decoding monitor records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Record is shorter than the fixed kind + value layout.
    #[error("malformed monitor event: expected at least {expected} bytes, got {actual}")]
    MalformedEvent {
        /// Minimum record length.
        expected: usize,
        /// Length actually received.
        actual: usize,
    },
}

/// Result alias for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
