//! Built-in ledger operations.

pub mod assets;
pub mod custody;
pub mod history;
pub mod seed;

pub use assets::{QueryAllAssets, RecordAsset};
pub use custody::{ChangeHolder, UpdateLocation};
pub use history::QueryAssetHistory;
pub use seed::InitLedger;

use crate::operation::Operation;

pub const INIT_LEDGER: &str = "initLedger";
pub const RECORD_ASSET: &str = "recordAsset";
pub const QUERY_ALL_ASSETS: &str = "queryAllAssets";
pub const CHANGE_HOLDER: &str = "changeHolder";
pub const UPDATE_LOCATION: &str = "updateLocation";
pub const QUERY_ASSET_HISTORY: &str = "queryAssetHistory";

/// Every built-in operation, one instance each.
pub fn all() -> Vec<Box<dyn Operation>> {
    vec![
        Box::new(InitLedger),
        Box::new(RecordAsset),
        Box::new(QueryAllAssets),
        Box::new(ChangeHolder),
        Box::new(UpdateLocation),
        Box::new(QueryAssetHistory),
    ]
}
