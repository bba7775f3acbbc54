use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use vledger_contract::operations::INIT_LEDGER;
use vledger_contract::{OperationRegistry, TransactionDispatcher};
use vledger_store::{InMemoryVersionedStore, JournalStore, VersionedStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Ledger server: one dispatcher over one store, exposed over HTTP.
pub struct LedgerServer {
    config: ServerConfig,
    state: AppState,
}

impl LedgerServer {
    /// Open the configured store and wire up the dispatcher.
    ///
    /// With no `journal_path` the ledger lives in memory and is lost on exit.
    pub fn open(config: ServerConfig) -> ServerResult<Self> {
        let store: Arc<dyn VersionedStore> = match &config.journal_path {
            Some(path) => Arc::new(JournalStore::open(path, config.journal.clone())?),
            None => Arc::new(InMemoryVersionedStore::new()),
        };
        let dispatcher = TransactionDispatcher::with_config(
            Arc::new(OperationRegistry::standard()),
            store,
            config.contract.clone(),
        );
        if config.seed_on_start {
            dispatcher.dispatch(INIT_LEDGER, &[])?;
            info!("seeded ledger with sample assets");
        }
        Ok(Self {
            config,
            state: AppState::new(dispatcher),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        info!(
            addr = %self.config.bind_addr,
            journal = ?self.config.journal_path,
            "ledger server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
