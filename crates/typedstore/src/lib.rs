//! # typedstore
//!
//! Typed keys and values on top of an embedded byte-keyed store.
//!
//! A [`TypedStore`] pairs a raw store with a key codec and a value codec.
//! Callers read and write their own types; the codecs turn them into bytes
//! on the way in and back on the way out.
//!
//! ## Quick Start
//!
//! ```
//! use typedstore::{StringCodec, TypedStore, Uint64Codec};
//!
//! let store = TypedStore::in_memory(StringCodec, Uint64Codec)?;
//!
//! store.put(&"apples".to_string(), &3)?;
//! store.put(&"pears".to_string(), &5)?;
//!
//! for (fruit, count) in store.items()? {
//!     println!("{fruit}: {count}");
//! }
//! # Ok::<(), typedstore::Error>(())
//! ```
//!
//! ## Default codecs
//!
//! Every primitive type has a default codec, so [`open_default`] only needs
//! the key and value types. Structured types opt in with
//! [`fallback_codec!`], which stores them with `bincode`.
//!
//! ## Iteration
//!
//! - [`TypedStore::items`] skips entries that fail to decode.
//! - [`TypedStore::all_items`] yields every entry with its decode error.
//! - [`TypedStore::fold`] hands every error to a callback that decides
//!   whether to continue.
//!
//! ## Modules
//!
//! - [`store`] - The typed store handle
//! - [`iter`] - Iteration strategies
//! - [`error`] - Error types

#![deny(clippy::unwrap_used)]

pub mod error;
pub mod iter;
pub mod store;

use std::path::Path;

pub use error::{Error, MultiError, Result, Stage};
pub use iter::{AllItems, Entry, IterState, Items};
pub use store::TypedStore;

pub use typedstore_core::{
    codec_for, fallback_codec, BincodeCodec, BytesCodec, Codec, CodecError, CodecResult,
    DefaultCodec, Float32Codec, Float64Codec, Int16Codec, Int32Codec, Int64Codec, IntCodec,
    StringCodec, Uint16Codec, Uint32Codec, Uint64Codec, UintCodec, FORMAT_VERSION,
};
pub use typedstore_storage::{
    CursorResult, KeyValue, RawCursor, RawStore, RedbStore, StorageError, StorageResult,
    StoreOptions, SyncPolicy,
};

/// A redb-backed store using the default codecs of `K` and `V`.
pub type DefaultStore<K, V> =
    TypedStore<<K as DefaultCodec>::Codec, <V as DefaultCodec>::Codec, RedbStore>;

/// Open or create a store at `location`, resolving codecs from the key and
/// value types.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the store cannot be opened.
///
/// # Example
///
/// ```
/// use typedstore::open_default;
///
/// let dir = tempfile::tempdir()?;
/// let store = open_default::<String, f64>(dir.path().join("prices.redb"))?;
///
/// store.put(&"coffee".to_string(), &3.5)?;
/// assert_eq!(store.get(&"coffee".to_string())?, 3.5);
/// store.close()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open_default<K, V>(location: impl AsRef<Path>) -> Result<DefaultStore<K, V>>
where
    K: DefaultCodec,
    V: DefaultCodec,
{
    TypedStore::open(location, codec_for::<K>(), codec_for::<V>())
}
