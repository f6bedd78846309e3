//! Defines the endpoint for recording a new transaction.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::html;

use crate::{
    AppState, Error,
    alert::Alert,
    api::{ApiClient, ApiError},
    auth::Session,
    user::Role,
};

use super::{
    form::{TransactionFormErrors, TransactionFormInput, transaction_form, validate},
    models::Transaction,
    table::{EMPTY_STATE_ROW_ID, TRANSACTIONS_BODY_ID, transaction_row},
};

/// The state needed to record a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The client for the finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for recording a new transaction.
///
/// A draft that fails local validation is returned with field errors and
/// never reaches the finance API. On success the cleared form comes back
/// together with an out-of-band prepend of the new row, so the record shows
/// at the head of the list without a re-fetch. A field-keyed API rejection
/// is mapped onto the form like local validation; anything else keeps the
/// draft and surfaces a generic notification.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(session): Extension<Session>,
    Form(input): Form<TransactionFormInput>,
) -> Response {
    let new_transaction = match validate(&input) {
        Ok(new_transaction) => new_transaction,
        Err(errors) => return transaction_form(&input, &errors).into_response(),
    };

    match state
        .api
        .create_transaction(&session.token, &new_transaction)
        .await
    {
        Ok(transaction) => create_success_response(&transaction, session.profile.role),
        Err(ApiError::Rejected(fields)) => {
            match TransactionFormErrors::from_field_errors(&fields) {
                Some(errors) => transaction_form(&input, &errors).into_response(),
                None => {
                    tracing::error!(
                        "transaction rejected with unrecognized fields: {:?}",
                        fields.fields().collect::<Vec<_>>()
                    );
                    create_failure_response(&input)
                }
            }
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");

            if matches!(error, ApiError::Unauthorized) {
                return Error::from(error).into_alert_response();
            }

            create_failure_response(&input)
        }
    }
}

fn create_success_response(transaction: &Transaction, viewer_role: Role) -> Response {
    html! {
        (transaction_form(&TransactionFormInput::default(), &TransactionFormErrors::default()))

        tbody id=(TRANSACTIONS_BODY_ID) hx-swap-oob="afterbegin"
        {
            (transaction_row(transaction, viewer_role))
        }

        tr id=(EMPTY_STATE_ROW_ID) hx-swap-oob="delete" {}

        (Alert::success("Transaction recorded successfully", "").into_markup())
    }
    .into_response()
}

fn create_failure_response(input: &TransactionFormInput) -> Response {
    html! {
        (transaction_form(input, &TransactionFormErrors::default()))

        (Alert::error(
            "Failed to create transaction",
            "The finance API could not record the transaction. Try again shortly.",
        ).into_markup())
    }
    .into_response()
}
