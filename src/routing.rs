//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    admin::{create_user_endpoint, get_admin_page, update_role_endpoint},
    auth::{
        admin_guard, admin_guard_hx, auth_guard, auth_guard_hx, get_log_in_page, get_log_out,
        post_log_in,
    },
    endpoints,
    not_found::{get_404_not_found, get_internal_server_error_page},
    transaction::{
        complete_transaction_endpoint, create_transaction_endpoint, get_transactions_page,
    },
};

/// Return a router with all the console's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_pages = Router::new()
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    let admin_pages = Router::new()
        .route(endpoints::ADMIN_VIEW, get(get_admin_page))
        .route_layer(middleware::from_fn(admin_guard))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/PATCH routes need to use the HX-Redirect header for auth
    // redirects to work properly for htmx requests.
    let protected_api = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx));

    let admin_api = Router::new()
        .route(
            endpoints::COMPLETE_TRANSACTION,
            post(complete_transaction_endpoint),
        )
        .route(endpoints::USERS_API, post(create_user_endpoint))
        .route(endpoints::USER_ROLE, patch(update_role_endpoint))
        .route_layer(middleware::from_fn(admin_guard_hx))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx));

    protected_pages
        .merge(admin_pages)
        .merge(protected_api)
        .merge(admin_api)
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
