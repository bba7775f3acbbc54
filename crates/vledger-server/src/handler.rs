use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vledger_contract::operations::{
    CHANGE_HOLDER, INIT_LEDGER, QUERY_ALL_ASSETS, QUERY_ASSET_HISTORY, RECORD_ASSET,
    UPDATE_LOCATION,
};
use vledger_contract::{Payload, TransactionDispatcher};
use vledger_types::FailureKind;

use crate::error::{ServerError, ServerResult};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<TransactionDispatcher>,
}

impl AppState {
    pub fn new(dispatcher: TransactionDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Run one dispatch on the blocking pool; store calls are synchronous.
    pub async fn dispatch(&self, function: String, args: Vec<String>) -> ServerResult<Payload> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let result = tokio::task::spawn_blocking(move || dispatcher.dispatch(&function, &args))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        Ok(result?)
    }
}

/// JSON rendering of a dispatch outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeBody {
    Success {
        /// Query results as JSON; `null` for writes.
        payload: Value,
    },
    Failure {
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<FailureKind>,
        message: String,
    },
}

impl OutcomeBody {
    pub fn success(payload: &[u8]) -> Self {
        let payload = if payload.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(payload)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(payload).into_owned()))
        };
        Self::Success { payload }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InvokeRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Body of `POST /v1/assets`: the key plus every record field.
///
/// All fields are required; a body missing one is rejected before dispatch.
#[derive(Clone, Debug, Deserialize)]
pub struct NewAsset {
    pub key: String,
    pub clarity: String,
    pub color: String,
    pub cut: String,
    pub carat: String,
    #[serde(rename = "cert")]
    pub certification: String,
    pub name: String,
    #[serde(rename = "transid")]
    pub trans_id: String,
    #[serde(rename = "holdername")]
    pub holder: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub image: String,
    pub latitude: String,
    pub longitude: String,
}

impl NewAsset {
    /// Positional `recordAsset` arguments: key, then the record fields.
    fn into_args(self) -> Vec<String> {
        vec![
            self.key,
            self.clarity,
            self.color,
            self.cut,
            self.carat,
            self.certification,
            self.name,
            self.trans_id,
            self.holder,
            self.timestamp,
            self.kind,
            self.image,
            self.latitude,
            self.longitude,
        ]
    }
}

/// Body of `POST /v1/assets/{key}/holder`.
#[derive(Clone, Debug, Deserialize)]
pub struct HolderChange {
    #[serde(rename = "holdername")]
    pub holder: String,
    #[serde(rename = "transid")]
    pub trans_id: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: String,
    pub longitude: String,
}

/// Body of `POST /v1/assets/{key}/location`.
#[derive(Clone, Debug, Deserialize)]
pub struct LocationChange {
    #[serde(rename = "transid")]
    pub trans_id: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    pub latitude: String,
    pub longitude: String,
}

fn json_payload(payload: Payload) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], payload).into_response()
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub async fn operations_handler(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(state.dispatcher.registry().names())
}

/// Generic entry point: any registered operation with raw string arguments.
pub async fn invoke_handler(
    State(state): State<AppState>,
    Json(request): Json<InvokeRequest>,
) -> ServerResult<Json<OutcomeBody>> {
    let payload = state.dispatch(request.function, request.args).await?;
    Ok(Json(OutcomeBody::success(&payload)))
}

pub async fn init_ledger_handler(State(state): State<AppState>) -> ServerResult<Json<OutcomeBody>> {
    let payload = state.dispatch(INIT_LEDGER.into(), Vec::new()).await?;
    Ok(Json(OutcomeBody::success(&payload)))
}

pub async fn list_assets_handler(State(state): State<AppState>) -> ServerResult<Response> {
    let payload = state.dispatch(QUERY_ALL_ASSETS.into(), Vec::new()).await?;
    Ok(json_payload(payload))
}

pub async fn record_asset_handler(
    State(state): State<AppState>,
    Json(asset): Json<NewAsset>,
) -> ServerResult<Json<OutcomeBody>> {
    let payload = state.dispatch(RECORD_ASSET.into(), asset.into_args()).await?;
    Ok(Json(OutcomeBody::success(&payload)))
}

pub async fn asset_history_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServerResult<Response> {
    let payload = state.dispatch(QUERY_ASSET_HISTORY.into(), vec![key]).await?;
    Ok(json_payload(payload))
}

pub async fn change_holder_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(change): Json<HolderChange>,
) -> ServerResult<Json<OutcomeBody>> {
    let args = vec![
        key,
        change.holder,
        change.trans_id,
        change.timestamp,
        change.kind,
        change.latitude,
        change.longitude,
    ];
    let payload = state.dispatch(CHANGE_HOLDER.into(), args).await?;
    Ok(Json(OutcomeBody::success(&payload)))
}

pub async fn update_location_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(change): Json<LocationChange>,
) -> ServerResult<Json<OutcomeBody>> {
    let args = vec![
        key,
        change.trans_id,
        change.timestamp,
        change.latitude,
        change.longitude,
    ];
    let payload = state.dispatch(UPDATE_LOCATION.into(), args).await?;
    Ok(Json(OutcomeBody::success(&payload)))
}
