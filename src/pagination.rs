//! This modules defines how lists of records are paged.

use axum::extract::FromRef;
use serde::Deserialize;

use crate::{AppState, Error};

/// The config for pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The number of records to return when a request does not specify a limit.
    pub default_limit: u32,
    /// The largest number of records a single request may return. Larger
    /// limits are reduced to this value.
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 1000,
        }
    }
}

impl FromRef<AppState> for PaginationConfig {
    fn from_ref(state: &AppState) -> Self {
        state.pagination_config
    }
}

/// The query parameters a client uses to page through records, e.g.
/// `?skip=20&limit=10`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// The number of records to skip.
    pub skip: Option<i64>,
    /// The maximum number of records to return.
    pub limit: Option<i64>,
}

/// A validated window into a list of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The number of records to skip, never negative.
    pub offset: i64,
    /// The maximum number of records to return, never negative.
    pub limit: i64,
}

impl PageQuery {
    /// Fill in defaults from `config` and check the bounds.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `skip` or `limit` is negative.
    pub fn resolve(self, config: &PaginationConfig) -> Result<Page, Error> {
        let offset = self.skip.unwrap_or(0);
        if offset < 0 {
            return Err(Error::Validation(format!(
                "skip must not be negative, got {offset}"
            )));
        }

        let limit = self.limit.unwrap_or(i64::from(config.default_limit));
        if limit < 0 {
            return Err(Error::Validation(format!(
                "limit must not be negative, got {limit}"
            )));
        }

        Ok(Page {
            offset,
            limit: limit.min(i64::from(config.max_limit)),
        })
    }
}
