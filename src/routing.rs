//! Application router configuration.

use axum::{
    Json, Router, middleware,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    record::{get_all_records_endpoint, push_record_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::PUSH, post(push_record_endpoint))
        .route(endpoints::GET_ALL_RECORDS, post(get_all_records_endpoint))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// A trivial response so clients can check the server is up.
async fn get_root() -> Response {
    (StatusCode::OK, Json(json!({ "message": "Hello World" }))).into_response()
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
}
