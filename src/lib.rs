//! Offertory is a web console for recording church offerings, tithes and
//! building-fund contributions, and for managing the finance-team accounts
//! that record them.
//!
//! The console stores no records of its own: every operation is proxied to
//! the church finance REST API. This library serves the HTML pages and
//! fragments that drive the console, keeping the API's bearer token in an
//! encrypted cookie.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use axum_server::Handle;
use tokio::signal;

mod admin;
mod alert;
mod api;
mod app_state;
mod auth;
mod endpoints;
mod html;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiError, FieldErrors};
pub use app_state::AppState;
pub use auth::AccessToken;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use transaction::{
    Category, NewTransaction, PaymentType, Transaction, TransactionFilters, TransactionId,
    TransactionStatus,
};
pub use user::{Credentials, NewUser, Role, User, UserId};

use crate::{
    alert::error_alert,
    not_found::{get_404_not_found_response, render_internal_server_error},
};

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

/// The errors that may occur in the console.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum Error {
    /// The username and password did not match an account on the finance API.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The stored access token was rejected by the finance API.
    ///
    /// The cookie holding the token should be invalidated and the client sent
    /// back to the log-in page.
    #[error("the session is no longer valid")]
    SessionExpired,

    /// The caller's role does not permit the attempted action.
    #[error("this action requires treasurer access")]
    Forbidden,

    /// A mutating call was rejected by the finance API with per-field
    /// messages.
    ///
    /// Form endpoints should map the messages onto their own field error
    /// display before falling back to a generic notification.
    #[error("the finance API rejected the submitted fields")]
    Rejected(FieldErrors),

    /// The finance API could not be reached at all.
    #[error("could not reach the finance API: {0}")]
    ApiUnavailable(String),

    /// The finance API answered with something the console could not use,
    /// e.g. an unexpected status code or a body that failed to decode.
    #[error("unexpected response from the finance API: {0}")]
    ApiResponse(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<ApiError> for Error {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Unauthorized => Error::SessionExpired,
            ApiError::Forbidden => Error::Forbidden,
            ApiError::Rejected(fields) => Error::Rejected(fields),
            ApiError::Transport(message) => Error::ApiUnavailable(message),
            ApiError::UnexpectedStatus(status) => Error::ApiResponse(format!("status {status}")),
            ApiError::Decode(message) => Error::ApiResponse(message),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidCredentials | Error::SessionExpired => {
                Redirect::to(endpoints::LOG_IN_VIEW).into_response()
            }
            Error::Forbidden => Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response(),
            Error::ApiUnavailable(ref details) => {
                tracing::error!("the finance API could not be reached: {details}");
                render_internal_server_error(
                    "Finance API Unavailable",
                    "The finance API could not be reached. Try again shortly.",
                )
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_internal_server_error(
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs.",
                )
            }
        }
    }
}

impl Error {
    /// Convert the error into an out-of-band alert response for htmx
    /// endpoints, leaving the request's swap target untouched.
    ///
    /// Session errors redirect to the log-in page instead, since there is no
    /// point showing an alert the client can no longer act on.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidCredentials | Error::SessionExpired => (
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response(),
            Error::Forbidden => error_alert(
                "Not permitted",
                "Only the church treasurer can perform this action.",
            ),
            Error::Rejected(_) => error_alert(
                "Submission rejected",
                "The finance API rejected the request. Check the submitted values and try again.",
            ),
            Error::ApiUnavailable(details) => {
                tracing::error!("the finance API could not be reached: {details}");
                error_alert(
                    "Finance API unavailable",
                    "The finance API could not be reached. Try again shortly.",
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                error_alert(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
            }
        }
    }
}
