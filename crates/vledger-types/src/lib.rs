//! Foundation types for the versioned ledger contract.
//!
//! Every other crate in the workspace depends on `vledger-types`.
//!
//! # Key Types
//!
//! - [`Record`] -- the versioned business object stored under each key
//! - [`Key`] -- caller-supplied identifier of one asset lineage
//! - [`Outcome`] -- tagged success/failure result returned by dispatch

pub mod error;
pub mod key;
pub mod outcome;
pub mod record;

pub use error::TypeError;
pub use key::Key;
pub use outcome::{FailureKind, Outcome};
pub use record::Record;
