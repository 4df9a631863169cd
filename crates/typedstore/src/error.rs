//! Error types for typed store operations.

use std::fmt;

use thiserror::Error;
use typedstore_core::CodecError;
use typedstore_storage::StorageError;

/// A specialized Result type for typed store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The part of an entry an error relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The key.
    Key,
    /// The value.
    Value,
    /// Advancing the raw cursor.
    Cursor,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Value => f.write_str("value"),
            Self::Cursor => f.write_str("cursor"),
        }
    }
}

/// Errors that can occur in typed store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A key or value could not be encoded.
    #[error("failed to encode {stage}: {source}")]
    Encode {
        /// Which half of the entry failed.
        stage: Stage,
        /// The codec error.
        source: CodecError,
    },

    /// Stored bytes could not be decoded.
    #[error("failed to decode {stage}: {source}")]
    Decode {
        /// Which half of the entry failed.
        stage: Stage,
        /// The codec error.
        source: CodecError,
    },

    /// The raw store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Every error raised while reading one entry.
    #[error(transparent)]
    Entry(#[from] MultiError),

    /// An error returned by a fold callback.
    #[error("{0}")]
    Callback(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary error returned from a fold callback.
    pub fn callback(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Callback(err.into())
    }

    /// Returns `true` if this is an encode error.
    #[must_use]
    pub const fn is_encode(&self) -> bool {
        matches!(self, Self::Encode { .. })
    }

    /// Returns `true` if this is a decode error.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` if this is a raw store error.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// The stage an encode or decode error relates to.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Encode { stage, .. } | Self::Decode { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Errors collected while reading a single entry.
///
/// Each member keeps the [`Stage`] it was raised at, so callers can tell a
/// bad key from a bad value or a failed cursor.
#[derive(Debug, Default)]
pub struct MultiError {
    errors: Vec<(Stage, Error)>,
}

impl MultiError {
    /// Create an empty aggregate.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error raised at `stage`.
    pub fn push(&mut self, stage: Stage, error: Error) {
        self.errors.push((stage, error));
    }

    /// Returns `true` if no errors were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the collected errors in the order they were raised.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &Error)> {
        self.errors.iter().map(|(stage, error)| (*stage, error))
    }

    /// The first error raised at `stage`, if any.
    #[must_use]
    pub fn get(&self, stage: Stage) -> Option<&Error> {
        self.iter().find(|(s, _)| *s == stage).map(|(_, error)| error)
    }

    /// The key decode error, if any.
    #[must_use]
    pub fn key_error(&self) -> Option<&Error> {
        self.get(Stage::Key)
    }

    /// The value decode error, if any.
    #[must_use]
    pub fn value_error(&self) -> Option<&Error> {
        self.get(Stage::Value)
    }

    /// The cursor error, if any.
    #[must_use]
    pub fn cursor_error(&self) -> Option<&Error> {
        self.get(Stage::Cursor)
    }

    /// Consume the aggregate, returning its members.
    #[must_use]
    pub fn into_inner(self) -> Vec<(Stage, Error)> {
        self.errors
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, error)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors.first().map(|(_, error)| error as &(dyn std::error::Error + 'static))
    }
}
