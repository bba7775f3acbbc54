//! Versioned ledger contract.
//!
//! Routes named operations with ordered string arguments onto a
//! [`VersionedStore`](vledger_store::VersionedStore):
//!
//! - [`OperationRegistry`] -- immutable name → [`Operation`] table
//! - [`TransactionDispatcher`] -- resolves a name, invokes the operation, and
//!   returns its result unchanged
//! - [`operations`] -- the ledger operations: `initLedger`, `recordAsset`,
//!   `queryAllAssets`, `changeHolder`, `updateLocation`, `queryAssetHistory`
//!
//! Operations hold no state. The store is the only source of persistent
//! state, and every failure is returned to the caller as a
//! [`ContractError`]; nothing is retried or swallowed.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use vledger_contract::{OperationRegistry, TransactionDispatcher};
//! use vledger_store::InMemoryVersionedStore;
//!
//! let dispatcher = TransactionDispatcher::new(
//!     Arc::new(OperationRegistry::standard()),
//!     Arc::new(InMemoryVersionedStore::new()),
//! );
//! dispatcher.dispatch("initLedger", &[]).unwrap();
//! let assets = dispatcher.dispatch("queryAllAssets", &[]).unwrap();
//! assert!(assets.starts_with(b"[{\"Key\":\"1\""));
//! ```

pub mod args;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod operation;
pub mod operations;
pub mod registry;

mod codec;

pub use args::{AssetHistoryArgs, ChangeHolderArgs, RecordAssetArgs, UpdateLocationArgs};
pub use config::{ContractConfig, WriteMode};
pub use dispatcher::TransactionDispatcher;
pub use error::{ContractError, ContractResult, RegistryError};
pub use operation::{InvocationContext, Operation, Payload};
pub use registry::{OperationRegistry, RegistryBuilder};

#[cfg(test)]
mod testing;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::seed::seed_records;
    use crate::testing::{args, memory_dispatcher, record_args};
    use serde_json::Value;
    use vledger_types::Record;

    fn scan(dispatcher: &TransactionDispatcher) -> Vec<(String, Record)> {
        let payload = dispatcher.dispatch("queryAllAssets", &[]).unwrap();
        let entries: Vec<Value> = serde_json::from_slice(&payload).unwrap();
        entries
            .into_iter()
            .map(|entry| {
                let key = entry["Key"].as_str().unwrap().to_owned();
                let record = serde_json::from_value(entry["Record"].clone()).unwrap();
                (key, record)
            })
            .collect()
    }

    fn history(dispatcher: &TransactionDispatcher, key: &str) -> Vec<Record> {
        let payload = dispatcher.dispatch("queryAssetHistory", &args(&[key])).unwrap();
        serde_json::from_slice(&payload).unwrap()
    }

    // -----------------------------------------------------------------------
    // Exact arity
    // -----------------------------------------------------------------------

    #[test]
    fn record_asset_enforces_exact_arity() {
        let (store, dispatcher) = memory_dispatcher();
        let full = record_args("42", "Akshay");

        let short = &full[..13];
        let mut long = full.clone();
        long.push("extra".into());

        for bad in [short.to_vec(), long] {
            let err = dispatcher.dispatch("recordAsset", &bad).unwrap_err();
            assert!(matches!(err, ContractError::ArgumentCount { expected: 14, .. }));
        }
        assert!(store.is_empty());

        assert_eq!(dispatcher.dispatch("recordAsset", &full).unwrap(), Payload::new());
        assert_eq!(store.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    #[test]
    fn init_ledger_is_idempotent() {
        let (store, dispatcher) = memory_dispatcher();
        dispatcher.dispatch("initLedger", &[]).unwrap();
        let first = scan(&dispatcher);

        dispatcher.dispatch("initLedger", &[]).unwrap();
        let second = scan(&dispatcher);

        assert_eq!(first, second);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn query_all_assets_is_ordered_and_matches_seed() {
        let (_store, dispatcher) = memory_dispatcher();
        dispatcher.dispatch("initLedger", &[]).unwrap();

        let expected: Vec<(String, Record)> = seed_records()
            .into_iter()
            .map(|(key, record)| (key.to_owned(), record))
            .collect();
        assert_eq!(scan(&dispatcher), expected);
    }

    // -----------------------------------------------------------------------
    // Read-modify-write
    // -----------------------------------------------------------------------

    #[test]
    fn change_holder_on_unwritten_key_is_not_found() {
        let (store, dispatcher) = memory_dispatcher();
        let err = dispatcher
            .dispatch(
                "changeHolder",
                &args(&["77", "Kapil", "tx", "t", "Transfer", "1", "2"]),
            )
            .unwrap_err();
        assert_eq!(err, ContractError::NotFound("77".into()));
        assert_eq!(store.version_count(), 0);
    }

    #[test]
    fn history_accumulates_in_write_order() {
        let (_store, dispatcher) = memory_dispatcher();
        dispatcher
            .dispatch("recordAsset", &record_args("42", "Akshay"))
            .unwrap();
        for holder in ["Akash", "Kapil"] {
            dispatcher
                .dispatch(
                    "changeHolder",
                    &args(&["42", holder, "tx", "t", "Transfer", "18.5", "73.9"]),
                )
                .unwrap();
        }

        let holders: Vec<String> = history(&dispatcher, "42")
            .into_iter()
            .map(|r| r.holder)
            .collect();
        assert_eq!(holders, ["Akshay", "Akash", "Kapil"]);
    }

    // -----------------------------------------------------------------------
    // Routing
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_operation_is_not_a_store_error() {
        let (_store, dispatcher) = memory_dispatcher();
        let outcome = dispatcher.call("deleteAsset", &args(&["1"]));
        assert_eq!(
            outcome.failure_kind(),
            Some(vledger_types::FailureKind::UnknownOperation)
        );
        assert_eq!(outcome.message(), Some("unknown operation: deleteAsset"));
    }
}
