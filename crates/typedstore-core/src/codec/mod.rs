//! Codecs between typed items and byte sequences.
//!
//! This module provides the [`Codec`] contract and every codec the crate
//! ships with.
//!
//! # Codec Traits
//!
//! - [`Codec`] - Encode an item to bytes and decode it back
//! - [`DefaultCodec`] - Resolve the codec for a type at compile time
//!
//! # Primitive Codecs
//!
//! - Unsigned integers: [`Uint16Codec`], [`Uint32Codec`], [`Uint64Codec`], [`UintCodec`]
//! - Signed integers: [`Int16Codec`], [`Int32Codec`], [`Int64Codec`], [`IntCodec`]
//! - Floating point: [`Float32Codec`], [`Float64Codec`]
//! - Strings and bytes: [`StringCodec`], [`BytesCodec`]
//!
//! Numeric codecs are fixed-width and big-endian; see the [`numeric`] module
//! for the ordering properties this gives unsigned keys.
//!
//! # Fallback Codec
//!
//! [`BincodeCodec`] handles any `serde` type. Use
//! [`fallback_codec!`](crate::fallback_codec) to make it the default codec
//! of your own types.
//!
//! # Example
//!
//! ```
//! use typedstore_core::codec::{Codec, Int64Codec, StringCodec};
//!
//! let key = StringCodec.encode(&"age".to_string()).unwrap();
//! assert_eq!(key, b"age");
//!
//! let value = Int64Codec.encode(&-1).unwrap();
//! assert_eq!(Int64Codec.decode(&value).unwrap(), -1);
//! ```

mod bytes;
mod fallback;
pub mod numeric;
mod traits;


pub use bytes::{BytesCodec, StringCodec};
pub use fallback::{BincodeCodec, FORMAT_VERSION};
pub use numeric::{
    Float32Codec, Float64Codec, Int16Codec, Int32Codec, Int64Codec, IntCodec, Uint16Codec,
    Uint32Codec, Uint64Codec, UintCodec,
};
pub use traits::{codec_for, Codec, DefaultCodec};
