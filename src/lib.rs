//! A personal finance tracker for recording expenses and revenues.
//!
//! This library provides a JSON REST API backed by a SQLite database. Both
//! record kinds are served by the same generic [record store](RecordStore),
//! instantiated once for [Expense] and once for [Revenue].

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
mod db;
pub mod endpoints;
mod expense;
mod extract;
mod logging;
mod pagination;
mod record;
mod revenue;
mod routing;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use expense::{Expense, ExpenseCategory};
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_LIMIT, logging_middleware};
pub use pagination::{Page, PageQuery, PaginationConfig};
pub use record::{Category, NewRecord, Record, RecordId, RecordKind, RecordStore, RecordUpdate};
pub use revenue::{Revenue, RevenueCategory};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client sent a value the record schema does not accept, e.g. a
    /// category outside the record kind's enumeration, a missing field or a
    /// negative page offset.
    #[error("{0}")]
    Validation(String),

    /// The request was rejected before its contents could be decoded, e.g.
    /// the body is not valid JSON or the content type is missing.
    #[error("{detail}")]
    InvalidRequest {
        /// The status code chosen by the extractor that rejected the request.
        status: StatusCode,
        /// A human readable explanation of the rejection.
        detail: String,
    },

    /// The requested resource was not found.
    ///
    /// The string names the kind of resource, e.g. "Expense", so that the
    /// client gets a message such as "Expense not found".
    #[error("{0} not found")]
    NotFound(&'static str),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 275 occurs when a CHECK constraint failed, code 1299 when a
            // NOT NULL constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 275 || sql_error.extended_code == 1299 =>
            {
                Error::Validation(desc.to_owned())
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Error::Validation(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            Error::InvalidRequest { status, detail } => (status, detail),
            Error::NotFound(kind) => (StatusCode::NOT_FOUND, format!("{kind} not found")),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
