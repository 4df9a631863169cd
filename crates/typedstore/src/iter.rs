//! Iteration over typed entries.
//!
//! Three strategies share one raw cursor per call and differ only in how
//! they treat entries that fail to decode:
//!
//! - [`Items`] skips them.
//! - [`AllItems`] yields them alongside the error.
//! - [`TypedStore::fold`](crate::TypedStore::fold) hands every error of an
//!   entry to a callback, which decides whether to continue.
//!
//! A cursor that fails while advancing ends the iteration, but is never
//! reported as a clean end of data: [`Items`] logs it, while [`AllItems`]
//! and `fold` pass it on as an [`Error::Storage`] at [`Stage::Cursor`].

use std::iter::FusedIterator;

use tracing::{debug, warn};
use typedstore_core::Codec;
use typedstore_storage::{RawCursor, RawStore};

use crate::error::{Error, MultiError, Result, Stage};

/// Lifecycle of an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    /// The cursor is open but nothing has been read.
    Created,
    /// Entries are being read.
    Active,
    /// The cursor reached the end of the data.
    Exhausted,
    /// The consumer stopped early.
    Cancelled,
    /// The cursor failed.
    Errored,
}

impl IterState {
    /// Returns `true` once no further entries will be produced.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Cancelled | Self::Errored)
    }
}

/// A typed key-value pair produced by [`AllItems`].
///
/// A field that failed to decode holds its type's default value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// The decoded key.
    pub key: K,
    /// The decoded value.
    pub value: V,
}

/// The pair of codecs an iteration decodes with.
struct Decoder<'a, KC, VC> {
    key: &'a KC,
    value: &'a VC,
}

impl<KC: Codec, VC: Codec> Decoder<'_, KC, VC> {
    fn key(&self, bytes: &[u8]) -> Result<KC::Item> {
        self.key.decode(bytes).map_err(|source| Error::Decode { stage: Stage::Key, source })
    }

    fn value(&self, bytes: &[u8]) -> Result<VC::Item> {
        self.value.decode(bytes).map_err(|source| Error::Decode { stage: Stage::Value, source })
    }
}

/// Lazy iterator over decodable entries, in store order.
///
/// Entries whose key or value fails to decode are skipped. Dropping the
/// iterator releases the cursor; nothing is written back to the store.
///
/// Created by [`TypedStore::items`](crate::TypedStore::items).
pub struct Items<'a, KC, VC, S>
where
    S: RawStore + 'a,
{
    cursor: S::Cursor<'a>,
    decoder: Decoder<'a, KC, VC>,
    state: IterState,
}

impl<'a, KC, VC, S> Items<'a, KC, VC, S>
where
    KC: Codec,
    VC: Codec,
    S: RawStore + 'a,
{
    pub(crate) fn new(cursor: S::Cursor<'a>, key: &'a KC, value: &'a VC) -> Self {
        Self { cursor, decoder: Decoder { key, value }, state: IterState::Created }
    }

    /// The current state of the iteration.
    #[must_use]
    pub const fn state(&self) -> IterState {
        self.state
    }

    /// Stop the iteration. Later calls to `next` return `None`.
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = IterState::Cancelled;
        }
    }
}

impl<'a, KC, VC, S> Iterator for Items<'a, KC, VC, S>
where
    KC: Codec,
    VC: Codec,
    S: RawStore + 'a,
{
    type Item = (KC::Item, VC::Item);

    fn next(&mut self) -> Option<Self::Item> {
        if self.state.is_terminal() {
            return None;
        }
        self.state = IterState::Active;

        loop {
            match self.cursor.next() {
                Ok(Some((key, value))) => {
                    let decoded = self
                        .decoder
                        .key(&key)
                        .and_then(|k| self.decoder.value(&value).map(|v| (k, v)));
                    match decoded {
                        Ok(pair) => return Some(pair),
                        Err(e) => debug!(error = %e, "skipping entry that failed to decode"),
                    }
                }
                Ok(None) => {
                    self.state = IterState::Exhausted;
                    return None;
                }
                Err(e) => {
                    warn!(error = %e, "cursor failed, ending iteration");
                    self.state = IterState::Errored;
                    return None;
                }
            }
        }
    }
}

impl<'a, KC, VC, S> FusedIterator for Items<'a, KC, VC, S>
where
    KC: Codec,
    VC: Codec,
    S: RawStore + 'a,
{
}

/// Lazy iterator over every entry, in store order, with its decode error.
///
/// A decode failure does not end the iteration: the entry is yielded with
/// whatever decoded and the error. The value is only decoded if the key
/// decoded. If the cursor fails, one final item carries the storage error.
///
/// Created by [`TypedStore::all_items`](crate::TypedStore::all_items).
pub struct AllItems<'a, KC, VC, S>
where
    S: RawStore + 'a,
{
    cursor: S::Cursor<'a>,
    decoder: Decoder<'a, KC, VC>,
    state: IterState,
}

impl<'a, KC, VC, S> AllItems<'a, KC, VC, S>
where
    KC: Codec,
    VC: Codec,
    S: RawStore + 'a,
{
    pub(crate) fn new(cursor: S::Cursor<'a>, key: &'a KC, value: &'a VC) -> Self {
        Self { cursor, decoder: Decoder { key, value }, state: IterState::Created }
    }

    /// The current state of the iteration.
    #[must_use]
    pub const fn state(&self) -> IterState {
        self.state
    }

    /// Stop the iteration. Later calls to `next` return `None`.
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = IterState::Cancelled;
        }
    }
}

impl<'a, KC, VC, S> Iterator for AllItems<'a, KC, VC, S>
where
    KC: Codec,
    KC::Item: Default,
    VC: Codec,
    VC::Item: Default,
    S: RawStore + 'a,
{
    type Item = (Entry<KC::Item, VC::Item>, Option<Error>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.state.is_terminal() {
            return None;
        }
        self.state = IterState::Active;

        match self.cursor.next() {
            Ok(Some((key, value))) => {
                let mut entry = Entry::default();
                let error = match self.decoder.key(&key) {
                    Ok(k) => {
                        entry.key = k;
                        match self.decoder.value(&value) {
                            Ok(v) => {
                                entry.value = v;
                                None
                            }
                            Err(e) => Some(e),
                        }
                    }
                    Err(e) => Some(e),
                };
                Some((entry, error))
            }
            Ok(None) => {
                self.state = IterState::Exhausted;
                None
            }
            Err(e) => {
                self.state = IterState::Errored;
                Some((Entry::default(), Some(Error::Storage(e))))
            }
        }
    }
}

impl<'a, KC, VC, S> FusedIterator for AllItems<'a, KC, VC, S>
where
    KC: Codec,
    KC::Item: Default,
    VC: Codec,
    VC::Item: Default,
    S: RawStore + 'a,
{
}

/// Drive `f` over every entry of `cursor`.
///
/// Key and value are decoded independently; every failure of an entry is
/// collected into one [`MultiError`].
pub(crate) fn fold<KC, VC, C, F>(mut cursor: C, key: &KC, value: &VC, mut f: F) -> Result<()>
where
    KC: Codec,
    KC::Item: Default,
    VC: Codec,
    VC::Item: Default,
    C: RawCursor,
    F: FnMut(KC::Item, VC::Item, Option<MultiError>) -> Result<()>,
{
    let decoder = Decoder { key, value };

    loop {
        let mut errors = MultiError::new();
        let (k, v) = match cursor.next() {
            Ok(Some((raw_key, raw_value))) => {
                let k = decoder.key(&raw_key).unwrap_or_else(|e| {
                    errors.push(Stage::Key, e);
                    KC::Item::default()
                });
                let v = decoder.value(&raw_value).unwrap_or_else(|e| {
                    errors.push(Stage::Value, e);
                    VC::Item::default()
                });
                (k, v)
            }
            Ok(None) => return Ok(()),
            Err(e) => {
                // The cursor is finished either way; the callback decides the result.
                errors.push(Stage::Cursor, Error::Storage(e));
                return f(KC::Item::default(), VC::Item::default(), Some(errors));
            }
        };

        f(k, v, (!errors.is_empty()).then_some(errors))?;
    }
}
