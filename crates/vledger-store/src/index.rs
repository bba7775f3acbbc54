use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use chrono::{DateTime, Utc};
use vledger_types::Key;

use crate::entry::{HistoryEntry, StateEntry, Versioned};
use crate::error::{StoreError, StoreResult};

/// In-memory view of current values and per-key history, shared by the
/// backends. Callers provide their own locking.
#[derive(Default)]
pub(crate) struct VersionIndex {
    current: BTreeMap<Key, Versioned>,
    history: HashMap<Key, Vec<HistoryEntry>>,
    last_version: u64,
}

impl VersionIndex {
    pub(crate) fn last_version(&self) -> u64 {
        self.last_version
    }

    pub(crate) fn next_version(&self) -> u64 {
        self.last_version + 1
    }

    pub(crate) fn key_count(&self) -> usize {
        self.current.len()
    }

    pub(crate) fn version_count(&self) -> usize {
        self.history.values().map(Vec::len).sum()
    }

    pub(crate) fn current(&self, key: &str) -> Option<Versioned> {
        self.current.get(key).cloned()
    }

    /// Fail unless the current version of `key` is `expected`.
    pub(crate) fn check_version(&self, key: &str, expected: Option<u64>) -> StoreResult<()> {
        let actual = self.current.get(key).map(|v| v.version);
        if actual != expected {
            return Err(StoreError::VersionConflict {
                key: key.to_owned(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Record a write. `version` must be greater than every applied version.
    pub(crate) fn apply(
        &mut self,
        key: Key,
        version: u64,
        value: Vec<u8>,
        recorded_at: DateTime<Utc>,
    ) {
        debug_assert!(version > self.last_version);
        self.last_version = version;
        self.history
            .entry(key.clone())
            .or_default()
            .push(HistoryEntry {
                version,
                value: value.clone(),
                recorded_at,
            });
        self.current.insert(key, Versioned { version, value });
    }

    pub(crate) fn scan(&self, start: &str, end: &str) -> Vec<StateEntry> {
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else if start >= end {
            return Vec::new();
        } else {
            Bound::Excluded(end)
        };

        self.current
            .range::<str, _>((Bound::Included(start), upper))
            .map(|(key, v)| StateEntry {
                key: key.clone(),
                value: v.value.clone(),
            })
            .collect()
    }

    pub(crate) fn history(&self, key: &str) -> Vec<HistoryEntry> {
        self.history.get(key).cloned().unwrap_or_default()
    }
}
