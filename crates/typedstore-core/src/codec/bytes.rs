//! Variable-length codecs for strings and raw bytes.
//!
//! Neither codec writes a length prefix: the store already records the
//! length of every key and value.

use super::traits::{Codec, DefaultCodec};
use crate::error::CodecResult;

/// Codec for `String`: the UTF-8 bytes, unchanged.
///
/// Decoding never fails. Invalid UTF-8 sequences are replaced with
/// `U+FFFD` rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Item = String;

    fn encode(&self, item: &String) -> CodecResult<Vec<u8>> {
        Ok(item.as_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Identity codec for `Vec<u8>`.
///
/// An empty input decodes to the empty vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BytesCodec;

impl Codec for BytesCodec {
    type Item = Vec<u8>;

    fn encode(&self, item: &Vec<u8>) -> CodecResult<Vec<u8>> {
        Ok(item.clone())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(bytes.to_vec())
    }
}

impl DefaultCodec for String {
    type Codec = StringCodec;
}

impl DefaultCodec for Vec<u8> {
    type Codec = BytesCodec;
}
