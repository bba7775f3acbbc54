//! HTTP front-end for the versioned ledger contract.
//!
//! Every route funnels into one [`TransactionDispatcher`](vledger_contract::TransactionDispatcher);
//! the asset routes are typed conveniences over `POST /v1/invoke`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{AppState, OutcomeBody};
pub use server::LedgerServer;
