//! Typedstore Storage
//!
//! This crate provides the raw byte-keyed store contract and the redb
//! backend that the typed layer is built on.
//!
//! # Modules
//!
//! - [`engine`] - Raw store traits and errors
//! - [`options`] - Open options for stores
//! - [`backends`] - Concrete store implementations

#![deny(clippy::unwrap_used)]

pub mod backends;
pub mod engine;
pub mod options;

pub use backends::RedbStore;
pub use engine::{CursorResult, KeyValue, RawCursor, RawStore, StorageError, StorageResult};
pub use options::{StoreOptions, SyncPolicy};
