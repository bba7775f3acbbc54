use crate::entry::{HistoryEntry, StateEntry, Versioned};
use crate::error::StoreResult;

/// Lazy, finite sequence of `(key, value)` pairs in key order.
pub type RangeIter<'a> = Box<dyn Iterator<Item = StoreResult<StateEntry>> + Send + 'a>;

/// Lazy, finite sequence of a key's versions, oldest first.
pub type HistoryIter<'a> = Box<dyn Iterator<Item = StoreResult<HistoryEntry>> + Send + 'a>;

/// Key-value store that retains every version written to each key.
///
/// All implementations must satisfy these invariants:
/// - A key maps to at most one current value.
/// - Every successful write appends exactly one version to that key's history.
/// - Version numbers strictly increase across the whole store.
/// - History iterates oldest-to-newest, identically on every call.
/// - Range scans iterate in ascending key order, `start` inclusive and `end`
///   exclusive. An empty `end` means no upper bound.
/// - Concurrent reads are always safe. Writes to the same key are serialized
///   by the store; callers needing read-modify-write atomicity use
///   [`VersionedStore::put_if_version`].
/// - All I/O errors are propagated, never silently ignored.
pub trait VersionedStore: Send + Sync {
    /// Current value and version of a key.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get_versioned(&self, key: &str) -> StoreResult<Option<Versioned>>;

    /// Write `value` as the new current version of `key` and return the
    /// version number assigned to it.
    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<u64>;

    /// Write `value` only if the current version of `key` equals `expected`
    /// (`None` meaning the key must not exist yet).
    ///
    /// Fails with [`StoreError::VersionConflict`](crate::StoreError::VersionConflict)
    /// otherwise, without writing anything.
    fn put_if_version(&self, key: &str, expected: Option<u64>, value: Vec<u8>)
        -> StoreResult<u64>;

    /// Scan current values with keys in `[start, end)`.
    fn range_scan(&self, start: &str, end: &str) -> StoreResult<RangeIter<'_>>;

    /// Every version ever written to `key`, oldest first.
    ///
    /// A key that was never written has an empty history.
    fn history_of(&self, key: &str) -> StoreResult<HistoryIter<'_>>;

    /// Current value of a key.
    ///
    /// Default implementation drops the version from `get_versioned()`.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.get_versioned(key)?.map(|v| v.value))
    }
}
