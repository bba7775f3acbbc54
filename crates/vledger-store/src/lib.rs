//! Versioned key-value storage for the ledger contract.
//!
//! Every write to a key replaces its current value and appends a new
//! version to that key's history. History is never rewritten and keys are
//! never deleted.
//!
//! # Storage Backends
//!
//! All backends implement the [`VersionedStore`] trait:
//!
//! - [`InMemoryVersionedStore`] -- `RwLock`-guarded maps for tests and embedding
//! - [`JournalStore`] -- append-only, CRC-framed journal file replayed on open
//!
//! # Design Rules
//!
//! 1. Values are opaque bytes. The store never interprets them.
//! 2. Version numbers are assigned by the store and strictly increase across
//!    all keys.
//! 3. History is returned oldest-to-newest.
//! 4. Range scans are ordered by key, start inclusive, end exclusive; an
//!    empty end key means unbounded.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod entry;
pub mod error;
pub mod journal;
pub mod memory;
pub mod traits;

mod index;

pub use entry::{HistoryEntry, StateEntry, Versioned};
pub use error::{StoreError, StoreResult};
pub use journal::{JournalConfig, JournalStore, SyncMode};
pub use memory::InMemoryVersionedStore;
pub use traits::{HistoryIter, RangeIter, VersionedStore};
