//! Typed arguments for each ledger operation.
//!
//! Callers pass every argument as a string. Each operation parses its
//! argument list into one of these structs before touching the store, and
//! the count must match exactly: extra or missing arguments are rejected
//! rather than truncated or padded.

use vledger_types::Record;

use crate::error::{ContractError, ContractResult};
use crate::operations::{CHANGE_HOLDER, QUERY_ASSET_HISTORY, RECORD_ASSET, UPDATE_LOCATION};

fn arity_error(operation: &'static str, expected: usize, args: &[String]) -> ContractError {
    ContractError::ArgumentCount {
        operation,
        expected,
        actual: args.len(),
    }
}

/// `recordAsset`: key followed by the 13 record fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordAssetArgs {
    pub key: String,
    pub record: Record,
}

impl RecordAssetArgs {
    pub const ARITY: usize = 1 + Record::FIELD_COUNT;

    pub fn parse(args: &[String]) -> ContractResult<Self> {
        let Some((key, fields)) = args.split_first() else {
            return Err(arity_error(RECORD_ASSET, Self::ARITY, args));
        };
        let record = Record::from_fields(fields)
            .map_err(|_| arity_error(RECORD_ASSET, Self::ARITY, args))?;
        Ok(Self {
            key: key.clone(),
            record,
        })
    }
}

/// `changeHolder`: key, holder, transid, timestamp, type, latitude, longitude.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeHolderArgs {
    pub key: String,
    pub holder: String,
    pub trans_id: String,
    pub timestamp: String,
    pub kind: String,
    pub latitude: String,
    pub longitude: String,
}

impl ChangeHolderArgs {
    pub const ARITY: usize = 7;

    pub fn parse(args: &[String]) -> ContractResult<Self> {
        let [key, holder, trans_id, timestamp, kind, latitude, longitude] = args else {
            return Err(arity_error(CHANGE_HOLDER, Self::ARITY, args));
        };
        Ok(Self {
            key: key.clone(),
            holder: holder.clone(),
            trans_id: trans_id.clone(),
            timestamp: timestamp.clone(),
            kind: kind.clone(),
            latitude: latitude.clone(),
            longitude: longitude.clone(),
        })
    }

    /// Overwrite the custody fields of `record`.
    pub fn apply(&self, record: &mut Record) {
        record.holder = self.holder.clone();
        record.trans_id = self.trans_id.clone();
        record.timestamp = self.timestamp.clone();
        record.kind = self.kind.clone();
        record.set_location(self.latitude.clone(), self.longitude.clone());
    }
}

/// `updateLocation`: key, transid, timestamp, latitude, longitude.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateLocationArgs {
    pub key: String,
    pub trans_id: String,
    pub timestamp: String,
    pub latitude: String,
    pub longitude: String,
}

impl UpdateLocationArgs {
    pub const ARITY: usize = 5;

    pub fn parse(args: &[String]) -> ContractResult<Self> {
        let [key, trans_id, timestamp, latitude, longitude] = args else {
            return Err(arity_error(UPDATE_LOCATION, Self::ARITY, args));
        };
        Ok(Self {
            key: key.clone(),
            trans_id: trans_id.clone(),
            timestamp: timestamp.clone(),
            latitude: latitude.clone(),
            longitude: longitude.clone(),
        })
    }

    /// Overwrite transaction, timestamp and location; the holder is untouched.
    pub fn apply(&self, record: &mut Record) {
        record.trans_id = self.trans_id.clone();
        record.timestamp = self.timestamp.clone();
        record.set_location(self.latitude.clone(), self.longitude.clone());
    }
}

/// `queryAssetHistory`: the key alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetHistoryArgs {
    pub key: String,
}

impl AssetHistoryArgs {
    pub const ARITY: usize = 1;

    pub fn parse(args: &[String]) -> ContractResult<Self> {
        let [key] = args else {
            return Err(arity_error(QUERY_ASSET_HISTORY, Self::ARITY, args));
        };
        Ok(Self { key: key.clone() })
    }
}
