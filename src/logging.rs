//! Middleware for logging requests and responses.

use axum::{
    body::to_bytes,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Bodies longer than this many bytes are truncated at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Requests with a body larger than this many bytes are rejected with 413.
pub const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level. Requests
/// with a body over [REQUEST_BODY_LIMIT] bytes are rejected with 413.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match to_bytes(body, REQUEST_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!("Could not read request body: {error}");
            return Error::InvalidRequest {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                detail: format!("Request body must be at most {REQUEST_BODY_LIMIT} bytes"),
            }
            .into_response();
        }
    };
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let response = next.run(Request::from_parts(parts, body_bytes.into())).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, body_bytes.into())
}

/// The longest prefix of `text` that is at most `limit` bytes and does not
/// split a character.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

/// The body as it appears in the `info` log: quoted, and cut with a trailing
/// `...` when longer than [LOG_BODY_LENGTH_LIMIT] bytes.
fn format_body(body: &str) -> String {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        format!("{:?}...", truncate(body, LOG_BODY_LENGTH_LIMIT))
    } else {
        format!("{body:?}")
    }
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    tracing::info!(
        "Received request: {} {}\nbody: {}",
        parts.method,
        parts.uri,
        format_body(body)
    );

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full request body: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    tracing::info!(
        "Sending response: {}\nbody: {}",
        parts.status,
        format_body(body)
    );

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full response body: {body:?}");
    }
}
