use crate::error::Result;

/// Abstract interface for the persistent key-value store.
///
/// All methods take `&self`; implementations handle their own interior
/// mutability since folio runs on a single thread.
pub trait KeyValueStore {
    /// Read the value under `key`.
    /// Returns Ok(None) if the key has never been written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    /// Fails with `PersistenceWrite` when the store is full or unavailable.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

