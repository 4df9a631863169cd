//! Serde-based fallback codec.
//!
//! [`BincodeCodec`] stores any `serde` type, including nested structs,
//! enums, maps and sequences. It is the codec to reach for when no
//! primitive codec applies.
//!
//! # Format
//!
//! ```text
//! [FORMAT_VERSION: u8][bincode payload (standard config)]
//! ```
//!
//! Decoding caps the memory a payload may claim at 64 MiB. Values that would
//! exceed the cap are refused by `encode`, so every stored payload can be
//! read back.
//!
//! The format is not promised to be stable across schema changes of `T`.
//! Decoding bytes produced for a different type fails in most cases (the
//! payload is rejected or leaves trailing bytes), but bincode is not
//! self-describing, so a structurally compatible type may still decode.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::Codec;
use crate::error::{CodecError, CodecResult};

/// Format version byte written before every fallback payload.
pub const FORMAT_VERSION: u8 = 1;

/// Upper bound on the bytes a single payload may claim while decoding.
///
/// Bounds the allocation a corrupt length prefix can trigger.
const PAYLOAD_LIMIT: usize = 64 * 1024 * 1024;

/// Encoded payloads up to this size are always within [`PAYLOAD_LIMIT`] when
/// decoded: each claimed unit is backed by at least one payload byte and no
/// primitive claims more than 16.
const UNCHECKED_ENCODE_LEN: usize = PAYLOAD_LIMIT / 16;

fn config() -> impl bincode::config::Config {
    bincode::config::standard().with_limit::<PAYLOAD_LIMIT>()
}

/// Codec for any `T: Serialize + DeserializeOwned`, backed by `bincode`.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use typedstore_core::{BincodeCodec, Codec};
///
/// let codec = BincodeCodec::<BTreeMap<String, u32>>::new();
/// let map = BTreeMap::from([("one".to_string(), 1), ("two".to_string(), 2)]);
///
/// let bytes = codec.encode(&map).unwrap();
/// assert_eq!(codec.decode(&bytes).unwrap(), map);
/// ```
pub struct BincodeCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> BincodeCodec<T> {
    /// Create a new codec.
    #[must_use]
    pub const fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for BincodeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BincodeCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BincodeCodec<T> {}

impl<T> fmt::Debug for BincodeCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BincodeCodec").field("type", &std::any::type_name::<T>()).finish()
    }
}

impl<T> Codec for BincodeCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Item = T;

    fn encode(&self, item: &T) -> CodecResult<Vec<u8>> {
        let mut buf = vec![FORMAT_VERSION];
        bincode::serde::encode_into_std_write(item, &mut buf, config())
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        if buf.len() - 1 > UNCHECKED_ENCODE_LEN {
            bincode::serde::decode_from_slice::<T, _>(&buf[1..], config()).map_err(|e| {
                CodecError::Encode(format!("value exceeds the decode limit: {e}"))
            })?;
        }
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<T> {
        let Some((&version, payload)) = bytes.split_first() else {
            return Err(CodecError::Decode("empty input".into()));
        };
        if version != FORMAT_VERSION {
            return Err(CodecError::Decode(format!(
                "unsupported format version {version}, expected {FORMAT_VERSION}"
            )));
        }

        let (item, read) = bincode::serde::decode_from_slice::<T, _>(payload, config())
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        if read != payload.len() {
            return Err(CodecError::Decode(format!(
                "{} trailing bytes after {}",
                payload.len() - read,
                std::any::type_name::<T>()
            )));
        }
        Ok(item)
    }
}
