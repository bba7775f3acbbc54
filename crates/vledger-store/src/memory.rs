use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;
use vledger_types::Key;

use crate::entry::Versioned;
use crate::error::{StoreError, StoreResult};
use crate::index::VersionIndex;
use crate::traits::{HistoryIter, RangeIter, VersionedStore};

/// In-memory versioned store.
///
/// Intended for tests and embedding. State is held behind a `RwLock`;
/// iterators returned by scans and history queries own a snapshot taken at
/// call time. Values are cloned on read/write.
pub struct InMemoryVersionedStore {
    index: RwLock<VersionIndex>,
    read_only: AtomicBool,
}

impl InMemoryVersionedStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            index: RwLock::new(VersionIndex::default()),
            read_only: AtomicBool::new(false),
        }
    }

    /// Number of keys with a current value.
    pub fn len(&self) -> usize {
        self.index.read().expect("lock poisoned").key_count()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of versions across all keys.
    pub fn version_count(&self) -> usize {
        self.index.read().expect("lock poisoned").version_count()
    }

    /// Reject (or accept again) all writes with [`StoreError::ReadOnly`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn write(&self, key: &str, expected: Option<Option<u64>>, value: Vec<u8>) -> StoreResult<u64> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        let mut index = self.index.write().expect("lock poisoned");
        if let Some(expected) = expected {
            index.check_version(key, expected)?;
        }
        let version = index.next_version();
        index.apply(Key::from(key), version, value, Utc::now());
        debug!(key, version, "stored version");
        Ok(version)
    }
}

impl Default for InMemoryVersionedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionedStore for InMemoryVersionedStore {
    fn get_versioned(&self, key: &str) -> StoreResult<Option<Versioned>> {
        Ok(self.index.read().expect("lock poisoned").current(key))
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<u64> {
        self.write(key, None, value)
    }

    fn put_if_version(
        &self,
        key: &str,
        expected: Option<u64>,
        value: Vec<u8>,
    ) -> StoreResult<u64> {
        self.write(key, Some(expected), value)
    }

    fn range_scan(&self, start: &str, end: &str) -> StoreResult<RangeIter<'_>> {
        let entries = self.index.read().expect("lock poisoned").scan(start, end);
        Ok(Box::new(entries.into_iter().map(Ok)))
    }

    fn history_of(&self, key: &str) -> StoreResult<HistoryIter<'_>> {
        let entries = self.index.read().expect("lock poisoned").history(key);
        Ok(Box::new(entries.into_iter().map(Ok)))
    }
}

impl std::fmt::Debug for InMemoryVersionedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryVersionedStore")
            .field("key_count", &self.len())
            .field("version_count", &self.version_count())
            .finish()
    }
}
