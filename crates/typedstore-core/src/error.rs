//! Error types for the core crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a value.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value cannot be represented by the codec.
    #[error("encode error: {0}")]
    Encode(String),

    /// The bytes are malformed for the target type.
    #[error("decode error: {0}")]
    Decode(String),

    /// A fixed-width codec was given input of the wrong length.
    #[error("invalid length for {type_name}: expected {expected} bytes, got {actual}")]
    Length {
        /// The type being decoded.
        type_name: &'static str,
        /// The exact number of bytes the codec requires.
        expected: usize,
        /// The number of bytes that were supplied.
        actual: usize,
    },
}

impl CodecError {
    /// Creates a length error for a fixed-width type.
    #[must_use]
    pub const fn length(type_name: &'static str, expected: usize, actual: usize) -> Self {
        Self::Length { type_name, expected, actual }
    }

    /// Returns `true` if this error was raised while encoding.
    #[must_use]
    pub const fn is_encode(&self) -> bool {
        matches!(self, Self::Encode(_))
    }

    /// Returns `true` if this error was raised while decoding.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Length { .. })
    }
}
