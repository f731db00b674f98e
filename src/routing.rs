//! Application router configuration.

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error, Expense, Revenue, endpoints,
    record::{
        RecordKind, create_record_endpoint, delete_record_endpoint, get_record_endpoint,
        list_records_endpoint, update_record_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_service_info))
        .merge(record_routes::<Expense>(endpoints::EXPENSES, endpoints::EXPENSE))
        .merge(record_routes::<Revenue>(endpoints::REVENUES, endpoints::REVENUE))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The CRUD routes for records of kind `K`.
///
/// `collection_path` serves creating and listing, with or without its trailing
/// slash. `item_path` must contain one path parameter for the record ID.
fn record_routes<K: RecordKind>(collection_path: &str, item_path: &str) -> Router<AppState> {
    let collection = post(create_record_endpoint::<K>).get(list_records_endpoint::<K>);

    Router::new()
        .route(collection_path, collection.clone())
        .route(collection_path.trim_end_matches('/'), collection)
        .route(
            item_path,
            get(get_record_endpoint::<K>)
                .put(update_record_endpoint::<K>)
                .delete(delete_record_endpoint::<K>),
        )
}

/// Describe the service.
async fn get_service_info() -> Json<Value> {
    Json(json!({
        "title": "Personal Finance API",
        "description": "API for managing personal expenses and revenues",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn get_404_not_found() -> Error {
    Error::NotFound("Resource")
}
