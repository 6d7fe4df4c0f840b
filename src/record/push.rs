//! The endpoint for storing a new record.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    record::{NewPolledRecord, PushResponse, create_record},
};

/// The confirmation message sent back with the new record's ID.
pub const PUSH_CONFIRMATION: &str = "Data stored";

/// The state needed for storing a record.
#[derive(Debug, Clone)]
pub struct PushRecordState {
    /// The connection to the application's database.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PushRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Store a pushed record and respond with its new ID.
///
/// A body that is not JSON or is missing a required field is rejected with a
/// 422 Unprocessable Entity and nothing is stored.
pub async fn push_record_endpoint(
    State(state): State<PushRecordState>,
    payload: Result<Json<NewPolledRecord>, JsonRejection>,
) -> Response {
    let new_record = match payload {
        Ok(Json(new_record)) => new_record,
        Err(rejection) => {
            tracing::warn!("Rejected pushed record: {}", rejection.body_text());
            return Error::InvalidRecord(rejection.body_text()).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_record(new_record, &connection) {
        Ok(record) => (
            StatusCode::OK,
            Json(PushResponse {
                id: record.id,
                message: PUSH_CONFIRMATION.to_owned(),
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while storing a record: {error}");

            error.into_response()
        }
    }
}
