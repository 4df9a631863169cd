//! Codec traits and the compile-time codec registry.

use crate::error::CodecResult;

/// A bidirectional conversion between an item type and a byte sequence.
///
/// Codecs are values rather than bare functions so that a store can own one
/// instance per key and value slot. Both operations are pure: they never
/// depend on store contents and have no side effects beyond allocation.
///
/// Canonical codecs satisfy the round-trip law: for every value `v` that
/// [`encode`](Codec::encode) accepts, `decode(encode(v))` is observably equal
/// to `v`. Decoding foreign bytes must return an error or a defined value,
/// never panic.
pub trait Codec {
    /// The type this codec converts.
    type Item;

    /// Encode a value to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`](crate::CodecError::Encode) if the value
    /// cannot be represented.
    fn encode(&self, item: &Self::Item) -> CodecResult<Vec<u8>>;

    /// Decode a value from bytes.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the bytes are malformed or truncated for
    /// the target type.
    fn decode(&self, bytes: &[u8]) -> CodecResult<Self::Item>;
}

impl<C: Codec + ?Sized> Codec for &C {
    type Item = C::Item;

    fn encode(&self, item: &Self::Item) -> CodecResult<Vec<u8>> {
        (**self).encode(item)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Self::Item> {
        (**self).decode(bytes)
    }
}

/// Associates a type with the codec used for it when none is given.
///
/// Implemented for every primitive the crate ships a codec for. Structured
/// types opt into [`BincodeCodec`](crate::BincodeCodec) through
/// [`fallback_codec!`](crate::fallback_codec).
pub trait DefaultCodec: Sized {
    /// The codec resolved for this type.
    type Codec: Codec<Item = Self> + Default;
}

/// Returns the default codec for `T`.
///
/// # Example
///
/// ```
/// use typedstore_core::{codec_for, Codec};
///
/// let codec = codec_for::<u16>();
/// assert_eq!(codec.encode(&0x0102).unwrap(), [0x01, 0x02]);
/// ```
#[must_use]
pub fn codec_for<T: DefaultCodec>() -> T::Codec {
    T::Codec::default()
}

/// Implements [`DefaultCodec`] for the given types using
/// [`BincodeCodec`](crate::BincodeCodec).
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use typedstore_core::{codec_for, fallback_codec, Codec};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// fallback_codec!(Point);
///
/// let codec = codec_for::<Point>();
/// let bytes = codec.encode(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(codec.decode(&bytes).unwrap(), Point { x: 1, y: 2 });
/// ```
#[macro_export]
macro_rules! fallback_codec {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::DefaultCodec for $ty {
                type Codec = $crate::BincodeCodec<$ty>;
            }
        )+
    };
}
