//! The console's route URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/users/{user_id}/role',
//! use [format_endpoint].

/// The log-in page, which is also the entry route for signed-out clients.
pub const LOG_IN_VIEW: &str = "/";
/// The page for recording and reviewing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for managing finance-team accounts. Treasurer only.
pub const ADMIN_VIEW: &str = "/admin";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to record a new transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to mark a transaction as completed.
pub const COMPLETE_TRANSACTION: &str = "/api/transactions/{transaction_id}/complete";
/// The route to create a finance-team account.
pub const USERS_API: &str = "/api/users";
/// The route to change an account's role.
pub const USER_ROLE: &str = "/api/users/{user_id}/role";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/users/{user_id}/role',
/// '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
