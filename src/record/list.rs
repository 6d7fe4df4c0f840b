//! The endpoint for listing every stored record.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, record::get_all_records};

/// The state needed for listing records.
#[derive(Debug, Clone)]
pub struct ListRecordsState {
    /// The connection to the application's database.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListRecordsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Respond with every stored record as a JSON array, oldest first.
///
/// The list is not paginated.
pub async fn get_all_records_endpoint(State(state): State<ListRecordsState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_records(&connection) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while listing records: {error}");

            error.into_response()
        }
    }
}
