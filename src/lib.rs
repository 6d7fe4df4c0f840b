//! Transaction tracker: polls a spreadsheet-backed feed of notification emails,
//! pulls the amount, date and virtual payment address out of the email bodies,
//! and stores the results through a small JSON ingestion API.
//!
//! The library provides both halves:
//! - the ingestion server ([build_router], [AppState]), and
//! - the poller ([Poller], [PollerConfig]) with its HTTP clients ([HttpFeed], [HttpIngest]).

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod config;
mod db;
pub mod endpoints;
pub mod extract;
mod feed;
mod ingest;
mod logging;
mod poller;
mod record;
mod routing;

pub use app_state::AppState;
pub use config::{DEFAULT_INGEST_URL, DEFAULT_POLL_INTERVAL, PollerConfig};
pub use db::initialize as initialize_db;
pub use feed::{Feed, FeedPage, FeedRow, HttpFeed};
pub use ingest::{HttpIngest, Ingest, PushOutcome};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware, setup_logging};
pub use poller::{PollSummary, Poller};
pub use record::{NewPolledRecord, PolledRecord, PushResponse, RecordId};
pub use routing::build_router;

/// Wait for either the ctrl+c or terminate signal, whichever comes first.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received ctrl+c signal."),
        _ = terminate => tracing::debug!("Received terminate signal."),
    }
}

/// An async task that waits for a shutdown signal and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    shutdown_signal().await;
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The pushed record was not valid JSON or was missing a required field.
    ///
    /// Nothing is stored when this error is returned.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The feed could not be reached or returned an error status.
    #[error("could not fetch the feed: {0}")]
    FeedRequest(String),

    /// The feed responded, but not with a `header` and `rows` object.
    #[error("the feed response was malformed: {0}")]
    MalformedFeed(String),

    /// The ingestion endpoint could not be reached.
    #[error("could not reach the ingestion endpoint: {0}")]
    IngestRequest(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidRecord(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    async fn body_text(error: Error) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");

        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[tokio::test]
    async fn invalid_record_is_a_client_error() {
        let (status, body) = body_text(Error::InvalidRecord("missing field `email`".into())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("missing field `email`"), "got body {body}");
    }

    #[tokio::test]
    async fn lock_error_hides_details() {
        let (status, body) = body_text(Error::DatabaseLockError).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("lock"), "got body {body}");
    }
}
