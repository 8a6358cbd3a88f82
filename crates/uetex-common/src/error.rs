//! Error types for uetex-common.

use thiserror::Error;

/// Common error type for uetex operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// Bytes did not match an expected literal.
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: Vec<u8>, actual: Vec<u8> },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
