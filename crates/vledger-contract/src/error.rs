use vledger_store::StoreError;
use vledger_types::{FailureKind, Outcome};

/// Errors produced by dispatching a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("incorrect number of arguments for {operation}: expecting {expected}, got {actual}")]
    ArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("could not locate asset {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("cannot decode record for key {key}: {reason}")]
    Decode { key: String, reason: String },
}

impl ContractError {
    /// The failure class reported to callers.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnknownOperation(_) => FailureKind::UnknownOperation,
            Self::ArgumentCount { .. } => FailureKind::ArgumentCount,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Store(_) => FailureKind::Store,
            Self::Decode { .. } => FailureKind::Decode,
        }
    }
}

impl From<StoreError> for ContractError {
    fn from(e: StoreError) -> Self {
        Self::Store(e.to_string())
    }
}

impl From<ContractError> for Outcome {
    fn from(e: ContractError) -> Self {
        Outcome::failure(e.kind(), e.to_string())
    }
}

/// Result alias for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

/// Errors from building an operation registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("operation already registered: {0}")]
    DuplicateOperation(String),

    #[error("operation name must not be empty")]
    EmptyName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_pass_message_through() {
        let err = ContractError::from(StoreError::Unavailable("peer unreachable".into()));
        assert_eq!(err.kind(), FailureKind::Store);
        assert!(err.to_string().contains("peer unreachable"));
    }

    #[test]
    fn converts_into_failure_outcome() {
        let outcome = Outcome::from(ContractError::NotFound("9".into()));
        assert_eq!(outcome.failure_kind(), Some(FailureKind::NotFound));
        assert_eq!(outcome.message(), Some("could not locate asset 9"));
    }

    #[test]
    fn argument_count_message() {
        let err = ContractError::ArgumentCount {
            operation: "updateLocation",
            expected: 5,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "incorrect number of arguments for updateLocation: expecting 5, got 4"
        );
    }
}
