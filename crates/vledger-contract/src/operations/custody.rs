use vledger_types::Record;

use crate::args::{ChangeHolderArgs, UpdateLocationArgs};
use crate::codec::{decode_record, encode_record};
use crate::config::WriteMode;
use crate::error::{ContractError, ContractResult};
use crate::operation::{InvocationContext, Operation, Payload};
use crate::operations::{CHANGE_HOLDER, UPDATE_LOCATION};

/// One `get`, one mutation, one write. Fails with `NotFound` if the key has
/// no current record. Under [`WriteMode::Optimistic`] the write only lands if
/// the key still has the version that was read.
fn read_modify_write(
    ctx: &InvocationContext<'_>,
    key: &str,
    mutate: impl FnOnce(&mut Record),
) -> ContractResult<()> {
    let current = ctx
        .store
        .get_versioned(key)?
        .ok_or_else(|| ContractError::NotFound(key.to_owned()))?;

    let mut record = decode_record(key, &current.value)?;
    mutate(&mut record);
    let bytes = encode_record(key, &record)?;

    match ctx.config.write_mode {
        WriteMode::Blind => ctx.store.put(key, bytes)?,
        WriteMode::Optimistic => ctx.store.put_if_version(key, Some(current.version), bytes)?,
    };
    Ok(())
}

/// Transfers an asset: holder, transaction, timestamp, type and location.
pub struct ChangeHolder;

impl Operation for ChangeHolder {
    fn name(&self) -> &'static str {
        CHANGE_HOLDER
    }

    fn invoke(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Payload> {
        let args = ChangeHolderArgs::parse(args)?;
        read_modify_write(ctx, &args.key, |record| args.apply(record))?;
        Ok(Payload::new())
    }
}

/// Moves an asset without changing its holder.
pub struct UpdateLocation;

impl Operation for UpdateLocation {
    fn name(&self) -> &'static str {
        UPDATE_LOCATION
    }

    fn invoke(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Payload> {
        let args = UpdateLocationArgs::parse(args)?;
        read_modify_write(ctx, &args.key, |record| args.apply(record))?;
        Ok(Payload::new())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vledger_store::VersionedStore;

    use super::*;
    use crate::operations::RECORD_ASSET;
    use crate::testing::{
        args, memory_dispatcher, optimistic_dispatcher_on, record_args, Fault, FaultyStore,
    };

    fn current(store: &dyn VersionedStore, key: &str) -> Record {
        Record::from_json_slice(&store.get(key).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn change_holder_rewrites_custody_fields() {
        let (store, dispatcher) = memory_dispatcher();
        dispatcher.dispatch(RECORD_ASSET, &record_args("5", "Akshay")).unwrap();
        dispatcher
            .dispatch(
                CHANGE_HOLDER,
                &args(&["5", "Akash", "tx-1", "2024-01-01", "Transfer", "19.07", "72.87"]),
            )
            .unwrap();

        let record = current(&*store, "5");
        assert_eq!(record.holder, "Akash");
        assert_eq!(record.trans_id, "tx-1");
        assert_eq!(record.timestamp, "2024-01-01");
        assert_eq!(record.kind, "Transfer");
        assert_eq!((record.latitude.as_str(), record.longitude.as_str()), ("19.07", "72.87"));
        assert_eq!(record.name, "Green Diamond");
    }

    #[test]
    fn update_location_leaves_holder_and_type() {
        let (store, dispatcher) = memory_dispatcher();
        dispatcher.dispatch(RECORD_ASSET, &record_args("5", "Akshay")).unwrap();
        dispatcher
            .dispatch(UPDATE_LOCATION, &args(&["5", "tx-2", "t2", "28.61", "77.20"]))
            .unwrap();

        let record = current(&*store, "5");
        assert_eq!(record.holder, "Akshay");
        assert_eq!(record.kind, "Add");
        assert_eq!(record.trans_id, "tx-2");
        assert_eq!(record.latitude, "28.61");
    }

    #[test]
    fn update_location_on_unwritten_key_is_not_found() {
        let (_store, dispatcher) = memory_dispatcher();
        let err = dispatcher
            .dispatch(UPDATE_LOCATION, &args(&["nope", "tx", "t", "1", "2"]))
            .unwrap_err();
        assert_eq!(err, ContractError::NotFound("nope".into()));
    }

    #[test]
    fn arity_is_checked_before_the_store() {
        let dispatcher =
            crate::testing::dispatcher_on(Arc::new(FaultyStore::new(Fault::Unavailable)));
        let err = dispatcher
            .dispatch(CHANGE_HOLDER, &args(&["5", "Akash"]))
            .unwrap_err();
        assert!(matches!(err, ContractError::ArgumentCount { expected: 7, actual: 2, .. }));
    }

    #[test]
    fn failing_read_is_reported_as_store_error() {
        let dispatcher =
            crate::testing::dispatcher_on(Arc::new(FaultyStore::new(Fault::Unavailable)));

        let calls = [
            (CHANGE_HOLDER, args(&["5", "Akash", "tx-1", "t", "Transfer", "1", "2"])),
            (UPDATE_LOCATION, args(&["5", "tx-2", "t", "1", "2"])),
        ];
        for (name, call_args) in calls {
            let err = dispatcher.dispatch(name, &call_args).unwrap_err();
            assert!(
                matches!(&err, ContractError::Store(msg) if msg.contains("injected fault")),
                "{name}: {err:?}"
            );
        }
    }

    #[test]
    fn failing_write_is_reported_as_store_error() {
        let (store, dispatcher) = memory_dispatcher();
        dispatcher.dispatch(RECORD_ASSET, &record_args("5", "Akshay")).unwrap();
        store.set_read_only(true);

        let err = dispatcher
            .dispatch(UPDATE_LOCATION, &args(&["5", "tx-2", "t", "1", "2"]))
            .unwrap_err();
        assert_eq!(err.kind(), vledger_types::FailureKind::Store);
        assert_eq!(store.version_count(), 1);
    }

    #[test]
    fn corrupt_current_value_is_decode_error_and_not_overwritten() {
        let (store, dispatcher) = memory_dispatcher();
        store.put("5", b"{broken".to_vec()).unwrap();
        let err = dispatcher
            .dispatch(UPDATE_LOCATION, &args(&["5", "tx", "t", "1", "2"]))
            .unwrap_err();
        assert!(matches!(err, ContractError::Decode { .. }));
        assert_eq!(store.version_count(), 1);
    }

    #[test]
    fn read_only_store_fails_the_write() {
        let (store, dispatcher) = memory_dispatcher();
        dispatcher.dispatch(RECORD_ASSET, &record_args("5", "Akshay")).unwrap();
        store.set_read_only(true);
        let err = dispatcher
            .dispatch(CHANGE_HOLDER, &args(&["5", "B", "tx", "t", "T", "1", "2"]))
            .unwrap_err();
        assert!(matches!(err, ContractError::Store(_)));
        assert_eq!(current(&*store, "5").holder, "Akshay");
    }

    #[test]
    fn optimistic_mode_writes_when_version_matches() {
        let store = Arc::new(vledger_store::InMemoryVersionedStore::new());
        let dispatcher = optimistic_dispatcher_on(store.clone());
        dispatcher.dispatch(RECORD_ASSET, &record_args("5", "Akshay")).unwrap();
        dispatcher
            .dispatch(CHANGE_HOLDER, &args(&["5", "Kapil", "tx", "t", "T", "1", "2"]))
            .unwrap();
        assert_eq!(current(&*store, "5").holder, "Kapil");
    }

    #[test]
    fn optimistic_mode_reports_conflicts() {
        let store = Arc::new(FaultyStore::new(Fault::StaleVersion));
        store
            .inner
            .put("5", Record::default().to_json_bytes().unwrap())
            .unwrap();
        let dispatcher = optimistic_dispatcher_on(store.clone());

        let err = dispatcher
            .dispatch(UPDATE_LOCATION, &args(&["5", "tx", "t", "1", "2"]))
            .unwrap_err();
        match err {
            ContractError::Store(message) => assert!(message.contains("version conflict")),
            other => panic!("expected store error, got {other:?}"),
        }
        assert_eq!(store.inner.version_count(), 1);
    }
}
