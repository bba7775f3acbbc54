use std::sync::Arc;

use tracing::debug;
use vledger_store::VersionedStore;
use vledger_types::Outcome;

use crate::config::ContractConfig;
use crate::error::{ContractError, ContractResult};
use crate::operation::{InvocationContext, Payload};
use crate::registry::OperationRegistry;

/// Routes a call `(name, args)` to the registered operation.
///
/// The dispatcher holds no mutable state. It adds no error translation of its
/// own: apart from [`ContractError::UnknownOperation`], every result is
/// exactly what the operation returned.
pub struct TransactionDispatcher {
    registry: Arc<OperationRegistry>,
    store: Arc<dyn VersionedStore>,
    config: ContractConfig,
}

impl TransactionDispatcher {
    /// Create a dispatcher with the default [`ContractConfig`].
    pub fn new(registry: Arc<OperationRegistry>, store: Arc<dyn VersionedStore>) -> Self {
        Self::with_config(registry, store, ContractConfig::default())
    }

    pub fn with_config(
        registry: Arc<OperationRegistry>,
        store: Arc<dyn VersionedStore>,
        config: ContractConfig,
    ) -> Self {
        Self {
            registry,
            store,
            config,
        }
    }

    /// Invoke `name` with `args` and return its payload or error.
    pub fn dispatch(&self, name: &str, args: &[String]) -> ContractResult<Payload> {
        let operation = self
            .registry
            .get(name)
            .ok_or_else(|| ContractError::UnknownOperation(name.to_owned()))?;

        debug!(operation = name, args = args.len(), "dispatching");
        let ctx = InvocationContext::new(self.store.as_ref(), &self.config);
        let result = operation.invoke(&ctx, args);
        if let Err(e) = &result {
            debug!(operation = name, kind = %e.kind(), error = %e, "operation failed");
        }
        result
    }

    /// [`Self::dispatch`], folded into the tagged [`Outcome`] callers receive.
    pub fn call(&self, name: &str, args: &[String]) -> Outcome {
        match self.dispatch(name, args) {
            Ok(payload) => Outcome::Success(payload),
            Err(e) => e.into(),
        }
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn store(&self) -> &dyn VersionedStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }
}

impl std::fmt::Debug for TransactionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionDispatcher")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}
