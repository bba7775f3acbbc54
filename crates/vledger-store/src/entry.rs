use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vledger_types::Key;

/// Current value of a key together with the version that wrote it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned {
    pub version: u64,
    pub value: Vec<u8>,
}

/// One `(key, value)` pair yielded by a range scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateEntry {
    pub key: Key,
    pub value: Vec<u8>,
}

/// One historical version of a key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Store-wide version number of the write.
    pub version: u64,
    /// Value written by this version.
    pub value: Vec<u8>,
    /// Wall-clock time the version was written.
    pub recorded_at: DateTime<Utc>,
}
