use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("wrong number of record fields: expected {expected}, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("serialization error: {0}")]
    Serialization(String),
}
