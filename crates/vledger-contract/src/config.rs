use serde::{Deserialize, Serialize};

/// How read-modify-write operations commit their single write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Plain `put`; per-key serialization is left to the store's platform.
    #[default]
    Blind,
    /// `put_if_version` against the version observed by the preceding read.
    /// Concurrent updates to the same key fail with a store version conflict
    /// instead of being lost.
    Optimistic,
}

/// Configuration for the ledger contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub write_mode: WriteMode,
}

impl ContractConfig {
    /// Configuration with optimistic read-modify-write enabled.
    pub fn optimistic() -> Self {
        Self {
            write_mode: WriteMode::Optimistic,
        }
    }
}
