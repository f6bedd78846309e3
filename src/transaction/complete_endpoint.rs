//! Defines the endpoint for marking a pending transaction as completed.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxResponseTrigger;

use crate::{AppState, Error, alert::Alert, api::ApiClient, auth::Session};

use super::{models::TransactionId, table::REFRESH_EVENT};

/// The state needed to complete a transaction.
#[derive(Debug, Clone)]
pub struct CompleteTransactionState {
    /// The client for the finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for CompleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for the one-way pending-to-completed transition.
///
/// Completion is not optimistic: on success the response fires the refresh
/// event so the table re-fetches the full filtered list and shows the
/// authoritative state. On failure only a notification is surfaced; the
/// list on the page is left as it was.
pub async fn complete_transaction_endpoint(
    State(state): State<CompleteTransactionState>,
    Extension(session): Extension<Session>,
    Path(transaction_id): Path<i64>,
) -> Response {
    let transaction_id = TransactionId::new(transaction_id);

    match state
        .api
        .complete_transaction(&session.token, transaction_id)
        .await
    {
        Ok(()) => (
            HxResponseTrigger::normal([REFRESH_EVENT]),
            Alert::success("Transaction completed successfully", "").into_markup(),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not complete transaction {transaction_id}: {error}");
            Error::from(error).into_alert_response()
        }
    }
}
