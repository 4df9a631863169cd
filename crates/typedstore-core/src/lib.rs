//! `typedstore` Core
//!
//! This crate provides the codec layer used by `typedstore` to turn typed keys
//! and values into the byte sequences an embedded key-value store understands.
//!
//! # Overview
//!
//! - **Codec contract**: [`Codec`] converts between an item type and bytes
//! - **Primitive codecs**: fixed-width big-endian integers and floats, raw
//!   strings and raw bytes ([`Uint64Codec`], [`StringCodec`], ...)
//! - **Fallback codec**: [`BincodeCodec`] for any `serde` type
//! - **Codec registry**: [`DefaultCodec`] resolves a codec from a type at
//!   compile time
//!
//! # Example
//!
//! ```
//! use typedstore_core::{codec_for, Codec, Uint32Codec};
//!
//! let bytes = Uint32Codec.encode(&42).unwrap();
//! assert_eq!(bytes, [0, 0, 0, 42]);
//!
//! let codec = codec_for::<String>();
//! let decoded = codec.decode(b"hello").unwrap();
//! assert_eq!(decoded, "hello");
//! ```
//!
//! # Modules
//!
//! - [`codec`] - Codec trait, primitive codecs and the fallback codec
//! - [`error`] - Error types ([`CodecError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod codec;
pub mod error;

pub use codec::{
    codec_for, BincodeCodec, BytesCodec, Codec, DefaultCodec, Float32Codec, Float64Codec,
    Int16Codec, Int32Codec, Int64Codec, IntCodec, StringCodec, Uint16Codec, Uint32Codec,
    Uint64Codec, UintCodec, FORMAT_VERSION,
};
pub use error::{CodecError, CodecResult};
