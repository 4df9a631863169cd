//! Raw store traits and abstractions.
//!
//! This module defines the contract a byte-keyed store must satisfy to sit
//! underneath a typed store.

mod error;
mod traits;

pub use error::{StorageError, StorageResult};
pub use traits::{CursorResult, KeyValue, RawCursor, RawStore};
