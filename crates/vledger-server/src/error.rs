use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use vledger_contract::ContractError;
use vledger_types::FailureKind;

use crate::handler::OutcomeBody;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("store error: {0}")]
    Store(#[from] vledger_store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Contract(e) => match e.kind() {
                FailureKind::UnknownOperation | FailureKind::NotFound => StatusCode::NOT_FOUND,
                FailureKind::ArgumentCount => StatusCode::BAD_REQUEST,
                FailureKind::Store => StatusCode::SERVICE_UNAVAILABLE,
                FailureKind::Decode => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Contract(e) => OutcomeBody::Failure {
                kind: Some(e.kind()),
                message: e.to_string(),
            },
            other => OutcomeBody::Failure {
                kind: None,
                message: other.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
