//! The typed store handle.

use std::fmt;
use std::path::Path;

use tracing::debug;
use typedstore_core::Codec;
use typedstore_storage::{RawStore, RedbStore, StoreOptions};

use crate::error::{Error, MultiError, Result, Stage};
use crate::iter::{self, AllItems, Items};

/// A key-value store with typed keys and values.
///
/// Keys are encoded with `KC` and values with `VC` before they reach the raw
/// store `S`. The raw store is owned and never exposed, so every read and
/// write goes through the codecs.
///
/// # Example
///
/// ```
/// use typedstore::{Int64Codec, StringCodec, TypedStore};
///
/// let store = TypedStore::in_memory(StringCodec, Int64Codec)?;
///
/// store.put(&"age".to_string(), &42)?;
/// assert_eq!(store.get(&"age".to_string())?, 42);
///
/// store.delete(&"age".to_string())?;
/// assert_eq!(store.get(&"age".to_string())?, 0);
/// store.close()?;
/// # Ok::<(), typedstore::Error>(())
/// ```
pub struct TypedStore<KC, VC, S = RedbStore> {
    store: S,
    key_codec: KC,
    value_codec: VC,
}

impl<KC, VC> TypedStore<KC, VC, RedbStore>
where
    KC: Codec,
    VC: Codec,
{
    /// Open or create a store at `location` with default options.
    ///
    /// The defaults sync every write and compact once a day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store cannot be opened.
    pub fn open(location: impl AsRef<Path>, key_codec: KC, value_codec: VC) -> Result<Self> {
        Self::open_with_options(location, key_codec, value_codec, StoreOptions::default())
    }

    /// Open or create a store at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store cannot be opened.
    pub fn open_with_options(
        location: impl AsRef<Path>,
        key_codec: KC,
        value_codec: VC,
        options: StoreOptions,
    ) -> Result<Self> {
        let store = RedbStore::open_with_options(location, options)?;
        Ok(Self::with_store(store, key_codec, value_codec))
    }

    /// Create a store that lives in memory only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store cannot be created.
    pub fn in_memory(key_codec: KC, value_codec: VC) -> Result<Self> {
        let store = RedbStore::in_memory()?;
        Ok(Self::with_store(store, key_codec, value_codec))
    }
}

impl<KC, VC, S> TypedStore<KC, VC, S>
where
    KC: Codec,
    VC: Codec,
    S: RawStore,
{
    /// Wrap an already opened raw store.
    pub fn with_store(store: S, key_codec: KC, value_codec: VC) -> Self {
        Self { store, key_codec, value_codec }
    }

    /// The codec used for keys.
    pub const fn key_codec(&self) -> &KC {
        &self.key_codec
    }

    /// The codec used for values.
    pub const fn value_codec(&self) -> &VC {
        &self.value_codec
    }

    fn encode_key(&self, key: &KC::Item) -> Result<Vec<u8>> {
        self.key_codec.encode(key).map_err(|source| Error::Encode { stage: Stage::Key, source })
    }

    fn decode_value(&self, bytes: &[u8]) -> Result<VC::Item> {
        self.value_codec
            .decode(bytes)
            .map_err(|source| Error::Decode { stage: Stage::Value, source })
    }

    /// Get the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an encode error for the key, a decode error for the stored
    /// value, or a storage error.
    pub fn try_get(&self, key: &KC::Item) -> Result<Option<VC::Item>> {
        let key = self.encode_key(key)?;
        match self.store.get(&key)? {
            Some(bytes) => self.decode_value(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Get the value stored under `key`.
    ///
    /// An absent key is not an error: the value type's default is returned.
    ///
    /// # Errors
    ///
    /// Returns an encode error for the key, a decode error for the stored
    /// value, or a storage error.
    pub fn get(&self, key: &KC::Item) -> Result<VC::Item>
    where
        VC::Item: Default,
    {
        Ok(self.try_get(key)?.unwrap_or_default())
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// Both halves are encoded before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an encode error for the key or value, or a storage error.
    pub fn put(&self, key: &KC::Item, value: &VC::Item) -> Result<()> {
        let key = self.encode_key(key)?;
        let value = self
            .value_codec
            .encode(value)
            .map_err(|source| Error::Encode { stage: Stage::Value, source })?;
        self.store.put(&key, &value)?;
        Ok(())
    }

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an encode error for the key, or a storage error.
    pub fn delete(&self, key: &KC::Item) -> Result<()> {
        let key = self.encode_key(key)?;
        self.store.delete(&key)?;
        Ok(())
    }

    /// Check whether `key` is present.
    ///
    /// # Errors
    ///
    /// Returns an encode error for the key, or a storage error.
    pub fn has(&self, key: &KC::Item) -> Result<bool> {
        let key = self.encode_key(key)?;
        Ok(self.store.has(&key)?)
    }

    /// Iterate over every entry that decodes, skipping the rest.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the cursor cannot be opened.
    pub fn items(&self) -> Result<Items<'_, KC, VC, S>> {
        let cursor = self.store.cursor()?;
        Ok(Items::new(cursor, &self.key_codec, &self.value_codec))
    }

    /// Iterate over every entry together with its decode error, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the cursor cannot be opened.
    pub fn all_items(&self) -> Result<AllItems<'_, KC, VC, S>> {
        let cursor = self.store.cursor()?;
        Ok(AllItems::new(cursor, &self.key_codec, &self.value_codec))
    }

    /// Call `f` for every entry in store order.
    ///
    /// `f` receives the key, the value and every error raised while reading
    /// the entry; fields that failed to decode hold their default value.
    /// Returning `Err` stops the fold and becomes its result. Reaching the
    /// end of the data returns `Ok(())`, even if earlier entries had errors
    /// that `f` accepted.
    ///
    /// If the cursor itself fails, `f` is called once more with default
    /// fields and the storage error, and its return value ends the fold.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the cursor cannot be opened, or the error
    /// returned by `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use typedstore::{Error, StringCodec, TypedStore, Uint32Codec};
    ///
    /// let store = TypedStore::in_memory(StringCodec, Uint32Codec)?;
    /// store.put(&"a".to_string(), &1)?;
    /// store.put(&"b".to_string(), &2)?;
    ///
    /// let mut total = 0;
    /// store.fold(|_key, value, errors| {
    ///     if let Some(errors) = errors {
    ///         return Err(Error::Entry(errors));
    ///     }
    ///     total += value;
    ///     Ok(())
    /// })?;
    /// assert_eq!(total, 3);
    /// # Ok::<(), typedstore::Error>(())
    /// ```
    pub fn fold<F>(&self, f: F) -> Result<()>
    where
        KC::Item: Default,
        VC::Item: Default,
        F: FnMut(KC::Item, VC::Item, Option<MultiError>) -> Result<()>,
    {
        let cursor = self.store.cursor()?;
        iter::fold(cursor, &self.key_codec, &self.value_codec, f)
    }

    /// Close the store, stopping background maintenance and releasing the
    /// raw store.
    ///
    /// # Errors
    ///
    /// Returns a storage error if pending writes cannot be flushed.
    pub fn close(self) -> Result<()> {
        self.store.close()?;
        debug!("closed typed store");
        Ok(())
    }
}

impl<KC, VC, S> fmt::Debug for TypedStore<KC, VC, S>
where
    KC: fmt::Debug,
    VC: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedStore")
            .field("key_codec", &self.key_codec)
            .field("value_codec", &self.value_codec)
            .finish_non_exhaustive()
    }
}
