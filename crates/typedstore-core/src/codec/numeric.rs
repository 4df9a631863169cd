//! Fixed-width numeric codecs.
//!
//! Every numeric value is stored as a fixed number of big-endian bytes:
//!
//! | Codec | Type | Bytes |
//! |-------|------|-------|
//! | [`Uint16Codec`] / [`Int16Codec`] | `u16` / `i16` | 2 |
//! | [`Uint32Codec`] / [`Int32Codec`] / [`Float32Codec`] | `u32` / `i32` / `f32` | 4 |
//! | [`Uint64Codec`] / [`Int64Codec`] / [`Float64Codec`] | `u64` / `i64` / `f64` | 8 |
//! | [`UintCodec`] / [`IntCodec`] | `usize` / `isize` | 4 |
//!
//! # Ordering
//!
//! Big-endian unsigned integers compare byte-wise exactly as they compare
//! numerically, so a store that orders keys lexicographically also orders
//! unsigned keys numerically. Signed integers are stored as their two's
//! complement bits and floats as their IEEE-754 bits, so negative values
//! sort *after* positive ones. This is a known limitation of the format,
//! kept so that existing files stay readable.
//!
//! # Platform-width integers
//!
//! `usize` and `isize` are always stored in 32 bits, whatever the host's
//! pointer width, so files written on 64-bit hosts stay readable on 32-bit
//! ones. Values outside the 32-bit range are truncated; use [`Uint64Codec`]
//! or [`Int64Codec`] for the full range.
//!
//! # Decoding
//!
//! Decoding requires the input to be exactly as long as the codec's width.
//! Shorter or longer input is rejected with [`CodecError::Length`].

use super::traits::{Codec, DefaultCodec};
use crate::error::{CodecError, CodecResult};

/// Copy `bytes` into a fixed-size array, rejecting any other length.
#[inline]
fn fixed<const N: usize>(type_name: &'static str, bytes: &[u8]) -> CodecResult<[u8; N]> {
    <[u8; N]>::try_from(bytes).map_err(|_| CodecError::length(type_name, N, bytes.len()))
}

/// Codec for `u16`: 2 bytes, big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uint16Codec;

impl Uint16Codec {
    /// Encoded width in bytes.
    pub const WIDTH: usize = 2;
}

impl Codec for Uint16Codec {
    type Item = u16;

    fn encode(&self, item: &u16) -> CodecResult<Vec<u8>> {
        Ok(item.to_be_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<u16> {
        fixed("u16", bytes).map(u16::from_be_bytes)
    }
}

/// Codec for `u32`: 4 bytes, big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uint32Codec;

impl Uint32Codec {
    /// Encoded width in bytes.
    pub const WIDTH: usize = 4;
}

impl Codec for Uint32Codec {
    type Item = u32;

    fn encode(&self, item: &u32) -> CodecResult<Vec<u8>> {
        Ok(item.to_be_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<u32> {
        fixed("u32", bytes).map(u32::from_be_bytes)
    }
}

/// Codec for `u64`: 8 bytes, big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uint64Codec;

impl Uint64Codec {
    /// Encoded width in bytes.
    pub const WIDTH: usize = 8;
}

impl Codec for Uint64Codec {
    type Item = u64;

    fn encode(&self, item: &u64) -> CodecResult<Vec<u8>> {
        Ok(item.to_be_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<u64> {
        fixed("u64", bytes).map(u64::from_be_bytes)
    }
}

/// Codec for `usize`, stored as a 4-byte `u32`.
///
/// Values above `u32::MAX` are truncated to their low 32 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UintCodec;

impl UintCodec {
    /// Encoded width in bytes.
    pub const WIDTH: usize = 4;
}

impl Codec for UintCodec {
    type Item = usize;

    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self, item: &usize) -> CodecResult<Vec<u8>> {
        Uint32Codec.encode(&(*item as u32))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<usize> {
        Uint32Codec.decode(bytes).map(|v| v as usize)
    }
}

/// Codec for `i16`: two's complement bits through [`Uint16Codec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Int16Codec;

impl Codec for Int16Codec {
    type Item = i16;

    #[allow(clippy::cast_sign_loss)]
    fn encode(&self, item: &i16) -> CodecResult<Vec<u8>> {
        Uint16Codec.encode(&(*item as u16))
    }

    #[allow(clippy::cast_possible_wrap)]
    fn decode(&self, bytes: &[u8]) -> CodecResult<i16> {
        Uint16Codec.decode(bytes).map(|v| v as i16)
    }
}

/// Codec for `i32`: two's complement bits through [`Uint32Codec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Int32Codec;

impl Codec for Int32Codec {
    type Item = i32;

    #[allow(clippy::cast_sign_loss)]
    fn encode(&self, item: &i32) -> CodecResult<Vec<u8>> {
        Uint32Codec.encode(&(*item as u32))
    }

    #[allow(clippy::cast_possible_wrap)]
    fn decode(&self, bytes: &[u8]) -> CodecResult<i32> {
        Uint32Codec.decode(bytes).map(|v| v as i32)
    }
}

/// Codec for `i64`: two's complement bits through [`Uint64Codec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Int64Codec;

impl Codec for Int64Codec {
    type Item = i64;

    #[allow(clippy::cast_sign_loss)]
    fn encode(&self, item: &i64) -> CodecResult<Vec<u8>> {
        Uint64Codec.encode(&(*item as u64))
    }

    #[allow(clippy::cast_possible_wrap)]
    fn decode(&self, bytes: &[u8]) -> CodecResult<i64> {
        Uint64Codec.decode(bytes).map(|v| v as i64)
    }
}

/// Codec for `isize`, stored as a 4-byte `i32`.
///
/// Values outside the `i32` range are truncated; decoding sign-extends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntCodec;

impl Codec for IntCodec {
    type Item = isize;

    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self, item: &isize) -> CodecResult<Vec<u8>> {
        Int32Codec.encode(&(*item as i32))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<isize> {
        Int32Codec.decode(bytes).map(|v| v as isize)
    }
}

/// Codec for `f32`: IEEE-754 bits through [`Uint32Codec`].
///
/// NaN payloads survive a round trip bit-for-bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float32Codec;

impl Codec for Float32Codec {
    type Item = f32;

    fn encode(&self, item: &f32) -> CodecResult<Vec<u8>> {
        Uint32Codec.encode(&item.to_bits())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<f32> {
        Uint32Codec.decode(bytes).map(f32::from_bits)
    }
}

/// Codec for `f64`: IEEE-754 bits through [`Uint64Codec`].
///
/// NaN payloads survive a round trip bit-for-bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float64Codec;

impl Codec for Float64Codec {
    type Item = f64;

    fn encode(&self, item: &f64) -> CodecResult<Vec<u8>> {
        Uint64Codec.encode(&item.to_bits())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<f64> {
        Uint64Codec.decode(bytes).map(f64::from_bits)
    }
}

impl DefaultCodec for u16 {
    type Codec = Uint16Codec;
}

impl DefaultCodec for u32 {
    type Codec = Uint32Codec;
}

impl DefaultCodec for u64 {
    type Codec = Uint64Codec;
}

impl DefaultCodec for usize {
    type Codec = UintCodec;
}

impl DefaultCodec for i16 {
    type Codec = Int16Codec;
}

impl DefaultCodec for i32 {
    type Codec = Int32Codec;
}

impl DefaultCodec for i64 {
    type Codec = Int64Codec;
}

impl DefaultCodec for isize {
    type Codec = IntCodec;
}

impl DefaultCodec for f32 {
    type Codec = Float32Codec;
}

impl DefaultCodec for f64 {
    type Codec = Float64Codec;
}
