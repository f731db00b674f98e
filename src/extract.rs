//! Request extractors that reject with [Error] so that clients always get a
//! JSON error body.

use axum::extract::{
    FromRequest, FromRequestParts, Path, Query,
    rejection::{JsonRejection, PathRejection, QueryRejection},
};

use crate::Error;

/// Like [axum::Json], but malformed bodies are rejected with [Error].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// Like [axum::extract::Query], but bad parameters are rejected with [Error].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(Error))]
pub struct QueryParams<T>(pub T);

/// Like [axum::extract::Path], but bad parameters are rejected with [Error].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(Error))]
pub struct PathParam<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // The body is valid JSON but does not match the record schema,
            // e.g. a missing field or an unknown category.
            JsonRejection::JsonDataError(error) => Error::Validation(error.body_text()),
            rejection => Error::InvalidRequest {
                status: rejection.status(),
                detail: rejection.body_text(),
            },
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(error) => {
                Error::Validation(error.body_text())
            }
            rejection => Error::InvalidRequest {
                status: rejection.status(),
                detail: rejection.body_text(),
            },
        }
    }
}
