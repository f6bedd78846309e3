//! Defines the endpoint for changing an account's role.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxResponseTrigger;
use serde::Deserialize;

use crate::{AppState, Error, alert::Alert, api::ApiClient, auth::Session, user::{Role, UserId}};

use super::user_table::REFRESH_EVENT;

/// The state needed to change a role.
#[derive(Debug, Clone)]
pub struct UpdateRoleState {
    /// The client for the finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for UpdateRoleState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The form data for a role change, submitted by the per-row select.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    /// The role the account should be given.
    pub role: Role,
}

/// A route handler for changing an account's role.
///
/// On success the response fires the refresh event so the account table
/// re-fetches the authoritative list. On failure only a notification is
/// surfaced; the select on the page keeps showing whatever the last fetch
/// reported.
pub async fn update_role_endpoint(
    State(state): State<UpdateRoleState>,
    Extension(session): Extension<Session>,
    Path(user_id): Path<i64>,
    Form(form): Form<RoleForm>,
) -> Response {
    let user_id = UserId::new(user_id);

    match state
        .api
        .update_role(&session.token, user_id, form.role)
        .await
    {
        Ok(()) => (
            HxResponseTrigger::normal([REFRESH_EVENT]),
            Alert::success("User role updated successfully", "").into_markup(),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not update the role of user {user_id}: {error}");
            Error::from(error).into_alert_response()
        }
    }
}
