use std::fmt;

use serde::{Deserialize, Serialize};

/// Error class of a failed dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No operation is registered under the requested name.
    UnknownOperation,
    /// The handler received a different number of arguments than it takes.
    ArgumentCount,
    /// A read-modify-write target key has no current record.
    NotFound,
    /// The versioned store failed the call.
    Store,
    /// A stored value could not be decoded into a record.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperation => write!(f, "UnknownOperation"),
            Self::ArgumentCount => write!(f, "ArgumentCountError"),
            Self::NotFound => write!(f, "NotFoundError"),
            Self::Store => write!(f, "StoreError"),
            Self::Decode => write!(f, "DecodeError"),
        }
    }
}

/// Tagged result of dispatching one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The operation completed; the payload is empty for writes and a JSON
    /// document for queries.
    Success(Vec<u8>),
    /// The operation failed and performed no mutation.
    Failure { kind: FailureKind, message: String },
}

impl Outcome {
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self::Success(payload.into())
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Success payload, if any.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// Failure class, if any.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { message, .. } => Some(message),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(payload) if payload.is_empty() => write!(f, "success"),
            Self::Success(payload) => write!(f, "success: {}", String::from_utf8_lossy(payload)),
            Self::Failure { kind, message } => write!(f, "{kind}: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let ok = Outcome::success(b"[]".to_vec());
        assert!(ok.is_success());
        assert_eq!(ok.payload(), Some(&b"[]"[..]));
        assert_eq!(ok.failure_kind(), None);

        let err = Outcome::failure(FailureKind::NotFound, "asset 9 does not exist");
        assert!(!err.is_success());
        assert_eq!(err.payload(), None);
        assert_eq!(err.failure_kind(), Some(FailureKind::NotFound));
        assert_eq!(err.message(), Some("asset 9 does not exist"));
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Outcome::success(Vec::new())), "success");
        assert_eq!(
            format!("{}", Outcome::failure(FailureKind::ArgumentCount, "expected 5")),
            "ArgumentCountError: expected 5"
        );
    }

    #[test]
    fn failure_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FailureKind::UnknownOperation).unwrap(),
            "\"unknown_operation\""
        );
    }
}
