use crate::error::StoreResult;

/// Key/value storage capability expected by consumers of a Zarr hierarchy.
///
/// Keys are `/`-delimited and relative to the store's root. Implementations hold no cache, so
/// every call observes the current state of the backing storage.
pub trait Store {
    /// Opaque name identifying this store instance. Carries no behaviour.
    fn root_label(&self) -> &str;

    /// Reads the full value stored under `key`.
    ///
    /// Fails with [`StoreError::KeyNotFound`](crate::StoreError::KeyNotFound) if the key can't
    /// address anything, and with [`StoreError::Filesystem`](crate::StoreError::Filesystem) if
    /// the key is addressable but the backing read fails. The two are never conflated.
    fn get(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Checks whether something exists under `key`. Never fails.
    fn contains(&self, key: &str) -> bool;

    /// Lists the keys in the store.
    ///
    /// Read-only stores don't support enumeration and return an empty list.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Deletes the value under `key`. Returns `true` if something was deleted.
    ///
    /// Read-only stores return `Ok(false)` and leave the storage untouched.
    fn delete_item(&self, key: &str) -> StoreResult<bool>;

    /// Stores `value` under `key`. Returns `true` if the value was written.
    ///
    /// Read-only stores log a warning and return `Ok(false)` instead of failing, so callers can
    /// probe writability through the return value.
    fn set_item(&self, key: &str, value: &[u8]) -> StoreResult<bool>;
}
