//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/v1/expenses/{expense_id}', use [format_endpoint].

/// The root route which describes the service.
pub const ROOT: &str = "/";
/// The route to create and list expenses.
pub const EXPENSES: &str = "/api/v1/expenses/";
/// The route to access a single expense.
pub const EXPENSE: &str = "/api/v1/expenses/{expense_id}";
/// The route to create and list revenues.
pub const REVENUES: &str = "/api/v1/revenues/";
/// The route to access a single revenue.
pub const REVENUE: &str = "/api/v1/revenues/{revenue_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with the next right brace,
/// e.g. '{expense_id}' in '/api/v1/expenses/{expense_id}'. Only the first
/// parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{id}{}",
        &endpoint_path[..param_start],
        &endpoint_path[param_end..]
    )
}
