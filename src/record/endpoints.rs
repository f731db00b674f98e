//! Route handlers for a record kind.
//!
//! Each handler is generic over [RecordKind] and is instantiated once per kind
//! in [build_router](crate::build_router).

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{
    Error, PageQuery, PaginationConfig,
    extract::{JsonBody, PathParam, QueryParams},
    record::{NewRecord, Record, RecordId, RecordKind, RecordStore, RecordUpdate},
};

/// A route handler for creating a new record, responds with the stored record.
pub async fn create_record_endpoint<K: RecordKind>(
    State(store): State<RecordStore<K>>,
    JsonBody(new_record): JsonBody<NewRecord<K::Category>>,
) -> Result<Json<Record<K::Category>>, Error> {
    store.create(new_record).map(Json)
}

/// A route handler for listing a page of records.
///
/// The page is chosen with the query parameters `skip` and `limit`.
pub async fn list_records_endpoint<K: RecordKind>(
    State(store): State<RecordStore<K>>,
    State(config): State<PaginationConfig>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<Vec<Record<K::Category>>>, Error> {
    let page = query.resolve(&config)?;

    store.list(page).map(Json)
}

/// A route handler for getting a record by its ID.
///
/// Responds with the status code 404 if the record does not exist.
pub async fn get_record_endpoint<K: RecordKind>(
    State(store): State<RecordStore<K>>,
    PathParam(id): PathParam<RecordId>,
) -> Result<Json<Record<K::Category>>, Error> {
    store.get(id).map(Json)
}

/// A route handler for partially updating a record, responds with the
/// updated record.
///
/// Responds with the status code 404 if the record does not exist.
pub async fn update_record_endpoint<K: RecordKind>(
    State(store): State<RecordStore<K>>,
    PathParam(id): PathParam<RecordId>,
    JsonBody(update): JsonBody<RecordUpdate<K::Category>>,
) -> Result<Json<Record<K::Category>>, Error> {
    store.update(id, update).map(Json)
}

/// A route handler for deleting a record, responds with a confirmation message.
///
/// Responds with the status code 404 if the record does not exist.
pub async fn delete_record_endpoint<K: RecordKind>(
    State(store): State<RecordStore<K>>,
    PathParam(id): PathParam<RecordId>,
) -> Result<Json<Value>, Error> {
    let record = store.delete(id)?;
    tracing::info!("Deleted {} {}: {:?}", K::NAME, id, record);

    Ok(Json(json!({
        "message": format!("{} deleted successfully", K::NAME)
    })))
}

#[cfg(test)]
mod record_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{
        AppState, ExpenseCategory, PaginationConfig, Record, RevenueCategory, build_router,
        endpoints::{self, format_endpoint},
    };

    fn get_test_server() -> TestServer {
        get_test_server_with_config(PaginationConfig::default())
    }

    fn get_test_server_with_config(config: PaginationConfig) -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, config).expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn ifood() -> Value {
        json!({
            "amount": 155,
            "description": "IFOOD",
            "type": "entertainment",
            "date": "2024-09-24",
        })
    }

    async fn must_create_expense(server: &TestServer, body: &Value) -> Record<ExpenseCategory> {
        let response = server.post(endpoints::EXPENSES).json(body).await;
        response.assert_status_ok();

        response.json::<Record<ExpenseCategory>>()
    }

    #[tokio::test]
    async fn expense_lifecycle() {
        let server = get_test_server();

        let created = must_create_expense(&server, &ifood()).await;
        assert_eq!(created.id, 1);
        assert_eq!(created.amount, 155.0);
        assert_eq!(created.description, "IFOOD");
        assert_eq!(created.category, ExpenseCategory::Entertainment);
        assert_eq!(created.date, datetime!(2024-09-24 00:00 UTC));
        assert_eq!(created.updated_at, None);
        let path = format_endpoint(endpoints::EXPENSE, created.id);

        let response = server.get(&path).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Record<ExpenseCategory>>(), created);

        let response = server.put(&path).json(&json!({ "amount": 160 })).await;
        response.assert_status_ok();
        let updated = response.json::<Record<ExpenseCategory>>();
        assert_eq!(updated.amount, 160.0);
        assert_eq!(updated.description, "IFOOD");
        assert!(updated.updated_at.is_some());
        assert_eq!(
            server.get(&path).await.json::<Record<ExpenseCategory>>(),
            updated
        );

        let response = server.delete(&path).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Expense deleted successfully" }));

        let response = server.get(&path).await;
        response.assert_status_not_found();
        response.assert_json(&json!({ "detail": "Expense not found" }));
    }

    #[tokio::test]
    async fn response_uses_type_field_and_rfc3339_dates() {
        let server = get_test_server();

        let response = server.post(endpoints::EXPENSES).json(&ifood()).await;

        let body = response.json::<Value>();
        assert_eq!(body["type"], "entertainment");
        assert_eq!(body["date"], "2024-09-24T00:00:00Z");
        assert_eq!(body["updated_at"], Value::Null);
        assert!(body["created_at"].is_string());
    }

    #[tokio::test]
    async fn get_missing_expense_returns_not_found() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE, 999))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "detail": "Expense not found" }));
    }

    #[tokio::test]
    async fn update_missing_revenue_returns_not_found() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::REVENUE, 999))
            .json(&json!({ "amount": 1 }))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "detail": "Revenue not found" }));
    }

    #[tokio::test]
    async fn delete_missing_revenue_returns_not_found() {
        let server = get_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::REVENUE, 999))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn create_with_category_of_other_kind_is_rejected() {
        let server = get_test_server();

        let response = server.post(endpoints::REVENUES).json(&ifood()).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.json::<Value>()["detail"].is_string());
        server
            .get(endpoints::REVENUES)
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn create_with_missing_field_is_rejected() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({ "amount": 10, "type": "food", "date": "2024-09-24" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_with_malformed_json_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .text("{\"amount\": ")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["detail"].is_string());
    }

    #[tokio::test]
    async fn update_with_category_outside_enumeration_is_rejected() {
        let server = get_test_server();
        let created = must_create_expense(&server, &ifood()).await;
        let path = format_endpoint(endpoints::EXPENSE, created.id);

        let response = server.put(&path).json(&json!({ "type": "salary" })).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            server.get(&path).await.json::<Record<ExpenseCategory>>(),
            created
        );
    }

    #[tokio::test]
    async fn non_integer_id_is_rejected() {
        let server = get_test_server();

        let response = server.get("/api/v1/expenses/abc").await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn revenue_lifecycle() {
        let server = get_test_server();

        let response = server
            .post(endpoints::REVENUES)
            .json(&json!({
                "amount": 5000.5,
                "description": "September pay",
                "type": "salary",
                "date": "2024-09-30T17:00:00+12:00",
            }))
            .await;
        response.assert_status_ok();
        let created = response.json::<Record<RevenueCategory>>();
        assert_eq!(created.category, RevenueCategory::Salary);
        assert_eq!(created.date, datetime!(2024-09-30 17:00 +12:00));
        let path = format_endpoint(endpoints::REVENUE, created.id);

        let updated = server
            .put(&path)
            .json(&json!({ "type": "freelance", "description": "Contract" }))
            .await
            .json::<Record<RevenueCategory>>();
        assert_eq!(updated.category, RevenueCategory::Freelance);
        assert_eq!(updated.description, "Contract");
        assert_eq!(updated.amount, 5000.5);

        let response = server.delete(&path).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Revenue deleted successfully" }));
    }

    #[tokio::test]
    async fn list_pages_through_records() {
        let server = get_test_server();
        let mut created = Vec::new();
        for amount in 0..5 {
            created.push(
                must_create_expense(
                    &server,
                    &json!({
                        "amount": amount,
                        "description": "coffee",
                        "type": "food",
                        "date": "2024-09-24",
                    }),
                )
                .await,
            );
        }

        let all = server
            .get(endpoints::EXPENSES)
            .await
            .json::<Vec<Record<ExpenseCategory>>>();
        let page = server
            .get(endpoints::EXPENSES)
            .add_query_param("skip", 2)
            .add_query_param("limit", 2)
            .await
            .json::<Vec<Record<ExpenseCategory>>>();

        assert_eq!(all, created);
        assert_eq!(page, created[2..4]);
    }

    #[tokio::test]
    async fn list_limit_is_clamped_to_max() {
        let server = get_test_server_with_config(PaginationConfig {
            default_limit: 1,
            max_limit: 2,
        });
        for _ in 0..3 {
            must_create_expense(&server, &ifood()).await;
        }

        let default_page = server
            .get(endpoints::EXPENSES)
            .await
            .json::<Vec<Record<ExpenseCategory>>>();
        let clamped_page = server
            .get(endpoints::EXPENSES)
            .add_query_param("limit", 100)
            .await
            .json::<Vec<Record<ExpenseCategory>>>();

        assert_eq!(default_page.len(), 1);
        assert_eq!(clamped_page.len(), 2);
    }

    #[tokio::test]
    async fn list_rejects_negative_skip() {
        let server = get_test_server();

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("skip", -1)
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn list_rejects_non_integer_limit() {
        let server = get_test_server();

        let response = server
            .get(endpoints::REVENUES)
            .add_query_param("limit", "lots")
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
