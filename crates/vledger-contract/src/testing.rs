//! Test doubles shared by the contract's unit tests.

use std::sync::Arc;

use vledger_store::{
    HistoryIter, InMemoryVersionedStore, RangeIter, StoreError, StoreResult, Versioned,
    VersionedStore,
};

use crate::config::ContractConfig;
use crate::dispatcher::TransactionDispatcher;
use crate::registry::OperationRegistry;

/// Which store call misbehaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Fault {
    /// Every call fails up front.
    Unavailable,
    /// Scans yield the real entries followed by an error.
    BrokenScan,
    /// History yields the real versions followed by an error.
    BrokenHistory,
    /// A conditional write always observes a conflict.
    StaleVersion,
}

/// In-memory store with one injected fault.
pub(crate) struct FaultyStore {
    pub(crate) inner: InMemoryVersionedStore,
    fault: Fault,
}

impl FaultyStore {
    pub(crate) fn new(fault: Fault) -> Self {
        Self {
            inner: InMemoryVersionedStore::new(),
            fault,
        }
    }

    fn unavailable(&self) -> StoreResult<()> {
        if self.fault == Fault::Unavailable {
            return Err(StoreError::Unavailable("injected fault".into()));
        }
        Ok(())
    }
}

impl VersionedStore for FaultyStore {
    fn get_versioned(&self, key: &str) -> StoreResult<Option<Versioned>> {
        self.unavailable()?;
        self.inner.get_versioned(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<u64> {
        self.unavailable()?;
        self.inner.put(key, value)
    }

    fn put_if_version(
        &self,
        key: &str,
        expected: Option<u64>,
        value: Vec<u8>,
    ) -> StoreResult<u64> {
        self.unavailable()?;
        if self.fault == Fault::StaleVersion {
            return Err(StoreError::VersionConflict {
                key: key.to_owned(),
                expected,
                actual: expected.map(|v| v + 1),
            });
        }
        self.inner.put_if_version(key, expected, value)
    }

    fn range_scan(&self, start: &str, end: &str) -> StoreResult<RangeIter<'_>> {
        self.unavailable()?;
        let entries = self.inner.range_scan(start, end)?;
        if self.fault == Fault::BrokenScan {
            let failure = std::iter::once(Err(StoreError::Unavailable("scan interrupted".into())));
            return Ok(Box::new(entries.chain(failure)));
        }
        Ok(entries)
    }

    fn history_of(&self, key: &str) -> StoreResult<HistoryIter<'_>> {
        self.unavailable()?;
        let entries = self.inner.history_of(key)?;
        if self.fault == Fault::BrokenHistory {
            let failure =
                std::iter::once(Err(StoreError::Unavailable("history interrupted".into())));
            return Ok(Box::new(entries.chain(failure)));
        }
        Ok(entries)
    }
}

pub(crate) fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// The 14 `recordAsset` arguments for `key` with the given holder.
pub(crate) fn record_args(key: &str, holder: &str) -> Vec<String> {
    args(&[
        key, "913F", "green", "good", "2", "GIA", "Green Diamond", "tx-0", holder, "t0", "Add",
        "", "18.52", "73.85",
    ])
}

pub(crate) fn dispatcher_on(store: Arc<dyn VersionedStore>) -> TransactionDispatcher {
    TransactionDispatcher::new(Arc::new(OperationRegistry::standard()), store)
}

pub(crate) fn optimistic_dispatcher_on(store: Arc<dyn VersionedStore>) -> TransactionDispatcher {
    TransactionDispatcher::with_config(
        Arc::new(OperationRegistry::standard()),
        store,
        ContractConfig::optimistic(),
    )
}

pub(crate) fn memory_dispatcher() -> (Arc<InMemoryVersionedStore>, TransactionDispatcher) {
    let store = Arc::new(InMemoryVersionedStore::new());
    let dispatcher = dispatcher_on(store.clone());
    (store, dispatcher)
}
