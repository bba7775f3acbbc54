use vledger_store::VersionedStore;

use crate::config::ContractConfig;
use crate::error::ContractResult;

/// Success payload of an operation: empty for writes, JSON for queries.
pub type Payload = Vec<u8>;

/// Everything an operation may touch during one invocation.
pub struct InvocationContext<'a> {
    /// The versioned store the operation reads and writes.
    pub store: &'a dyn VersionedStore,
    /// Contract configuration in effect for this call.
    pub config: &'a ContractConfig,
}

impl<'a> InvocationContext<'a> {
    pub fn new(store: &'a dyn VersionedStore, config: &'a ContractConfig) -> Self {
        Self { store, config }
    }
}

/// A single named ledger operation.
///
/// Operations are stateless: the result depends only on the context and the
/// arguments. The trait is object-safe and `Send + Sync` so operations can be
/// stored in a shared registry as `Box<dyn Operation>`.
pub trait Operation: Send + Sync {
    /// Name callers dispatch on (e.g., "recordAsset").
    fn name(&self) -> &'static str;

    /// Execute against the store with the caller's ordered arguments.
    fn invoke(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Payload>;
}
