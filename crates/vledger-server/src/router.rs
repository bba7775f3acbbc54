use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all ledger endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/operations", get(handler::operations_handler))
        .route("/v1/invoke", post(handler::invoke_handler))
        .route("/v1/ledger/init", post(handler::init_ledger_handler))
        .route(
            "/v1/assets",
            get(handler::list_assets_handler).post(handler::record_asset_handler),
        )
        .route("/v1/assets/:key/history", get(handler::asset_history_handler))
        .route("/v1/assets/:key/holder", post(handler::change_holder_handler))
        .route("/v1/assets/:key/location", post(handler::update_location_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
