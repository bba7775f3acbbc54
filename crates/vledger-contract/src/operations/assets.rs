use crate::args::RecordAssetArgs;
use crate::codec::{decode_record, encode_record};
use crate::error::{ContractError, ContractResult};
use crate::operation::{InvocationContext, Operation, Payload};
use crate::operations::{QUERY_ALL_ASSETS, RECORD_ASSET};

/// Stores a new record (or overwrites the current one) under a key.
pub struct RecordAsset;

impl Operation for RecordAsset {
    fn name(&self) -> &'static str {
        RECORD_ASSET
    }

    fn invoke(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Payload> {
        let RecordAssetArgs { key, record } = RecordAssetArgs::parse(args)?;
        let bytes = encode_record(&key, &record)?;
        ctx.store.put(&key, bytes)?;
        Ok(Payload::new())
    }
}

/// Lists every current record as `[{"Key":"<key>", "Record":{..}}, ..]` in
/// ascending key order.
///
/// Takes no arguments; any supplied are ignored.
pub struct QueryAllAssets;

impl Operation for QueryAllAssets {
    fn name(&self) -> &'static str {
        QUERY_ALL_ASSETS
    }

    fn invoke(&self, ctx: &InvocationContext<'_>, _args: &[String]) -> ContractResult<Payload> {
        let mut buffer = Vec::from(&b"["[..]);
        let mut written = false;

        for entry in ctx.store.range_scan("", "")? {
            let entry = entry?;
            let key = entry.key.as_str();
            let record = encode_record(key, &decode_record(key, &entry.value)?)?;

            if written {
                buffer.push(b',');
            }
            buffer.extend_from_slice(b"{\"Key\":");
            buffer.extend_from_slice(&json_string(key)?);
            buffer.extend_from_slice(b", \"Record\":");
            buffer.extend_from_slice(&record);
            buffer.push(b'}');
            written = true;
        }

        buffer.push(b']');
        Ok(buffer)
    }
}

/// JSON-escape a key for the scan payload; failures share the
/// [`ContractError::Decode`] class with record encoding.
fn json_string(key: &str) -> ContractResult<Vec<u8>> {
    serde_json::to_vec(key).map_err(|e| ContractError::Decode {
        key: key.to_owned(),
        reason: e.to_string(),
    })
}
