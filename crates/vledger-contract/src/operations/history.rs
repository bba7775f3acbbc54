use crate::args::AssetHistoryArgs;
use crate::codec::decode_record;
use crate::error::{ContractError, ContractResult};
use crate::operation::{InvocationContext, Operation, Payload};
use crate::operations::QUERY_ASSET_HISTORY;

/// Every version of one asset as a JSON array of records, oldest first.
///
/// A version that fails to decode fails the whole query.
pub struct QueryAssetHistory;

impl Operation for QueryAssetHistory {
    fn name(&self) -> &'static str {
        QUERY_ASSET_HISTORY
    }

    fn invoke(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Payload> {
        let AssetHistoryArgs { key } = AssetHistoryArgs::parse(args)?;

        let records = ctx
            .store
            .history_of(&key)?
            .map(|entry| {
                let entry = entry?;
                decode_record(&key, &entry.value)
            })
            .collect::<ContractResult<Vec<_>>>()?;

        serde_json::to_vec(&records).map_err(|e| ContractError::Decode {
            key,
            reason: e.to_string(),
        })
    }
}
