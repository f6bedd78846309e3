//! Defines the endpoint for registering a new finance-team account.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxResponseTrigger;
use maud::html;

use crate::{
    AppState, Error,
    alert::Alert,
    api::{ApiClient, ApiError},
    auth::Session,
};

use super::{
    user_form::{UserFormErrors, UserFormInput, user_form, validate},
    user_table::REFRESH_EVENT,
};

/// The state needed to register an account.
#[derive(Debug, Clone)]
pub struct CreateUserState {
    /// The client for the finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for CreateUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for registering a new account.
///
/// Unlike transaction creation, a successful registration does not patch
/// the list locally: the response fires the refresh event and the table
/// re-fetches the authoritative account list. Validation and error mapping
/// follow the same contract as the transaction form.
pub async fn create_user_endpoint(
    State(state): State<CreateUserState>,
    Extension(session): Extension<Session>,
    Form(input): Form<UserFormInput>,
) -> Response {
    let new_user = match validate(&input) {
        Ok(new_user) => new_user,
        Err(errors) => return user_form(&input, &errors).into_response(),
    };

    match state.api.register_user(&session.token, &new_user).await {
        Ok(()) => (
            HxResponseTrigger::normal([REFRESH_EVENT]),
            html! {
                (user_form(&UserFormInput::default(), &UserFormErrors::default()))

                (Alert::success("User created successfully", "").into_markup())
            },
        )
            .into_response(),
        Err(ApiError::Rejected(fields)) => match UserFormErrors::from_field_errors(&fields) {
            Some(errors) => user_form(&input, &errors).into_response(),
            None => {
                tracing::error!(
                    "registration rejected with unrecognized fields: {:?}",
                    fields.fields().collect::<Vec<_>>()
                );
                create_failure_response(&input)
            }
        },
        Err(error) => {
            tracing::error!("could not create user: {error}");

            if matches!(error, ApiError::Unauthorized) {
                return Error::from(error).into_alert_response();
            }

            create_failure_response(&input)
        }
    }
}

fn create_failure_response(input: &UserFormInput) -> Response {
    html! {
        (user_form(input, &UserFormErrors::default()))

        (Alert::error(
            "Failed to create user",
            "The finance API could not register the account. Try again shortly.",
        ).into_markup())
    }
    .into_response()
}

#[cfg(test)]
mod create_user_endpoint_tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Extension, Json, Router, extract::State, http::StatusCode, routing::post};
    use axum_extra::extract::Form;
    use serde_json::json;

    use crate::{
        admin::user_form::UserFormInput,
        auth::{AccessToken, Session},
        test_utils::{response_body_text, sample_user, spawn_stub_api},
        user::Role,
    };

    use super::{CreateUserState, create_user_endpoint};

    fn session() -> Session {
        Session {
            token: AccessToken::new("token-123".to_owned()),
            profile: sample_user(1, Role::Admin),
        }
    }

    fn valid_input() -> UserFormInput {
        UserFormInput {
            username: "otieno".to_owned(),
            email: "otieno@example.org".to_owned(),
            first_name: "Brian".to_owned(),
            last_name: "Otieno".to_owned(),
            password: "correct horse".to_owned(),
            password2: "correct horse".to_owned(),
            role: Role::Finance,
        }
    }

    fn counting_register_router(calls: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/api/auth/register/",
            post(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    (
                        StatusCode::CREATED,
                        Json(json!({ "detail": "User registered successfully." })),
                    )
                }
            }),
        )
    }

    #[tokio::test]
    async fn mismatched_passwords_are_rejected_without_a_network_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let api = spawn_stub_api(counting_register_router(calls.clone())).await;
        let state = CreateUserState { api };

        let input = UserFormInput {
            password2: "different".to_owned(),
            ..valid_input()
        };

        let response = create_user_endpoint(State(state), Extension(session()), Form(input)).await;

        let body = response_body_text(response).await;
        assert!(
            body.contains("Passwords do not match"),
            "response should carry the confirmation error"
        );
        assert_eq!(
            calls.load(Ordering::SeqCst),
            0,
            "a locally rejected draft must not reach the finance API"
        );
    }

    #[tokio::test]
    async fn successful_registration_triggers_a_full_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let api = spawn_stub_api(counting_register_router(calls.clone())).await;
        let state = CreateUserState { api };

        let response =
            create_user_endpoint(State(state), Extension(session()), Form(valid_input())).await;

        let trigger = response
            .headers()
            .get("hx-trigger")
            .expect("registration should fire the refresh event");
        assert_eq!(trigger, "users-changed");

        let body = response_body_text(response).await;
        assert!(
            body.contains("User created successfully"),
            "response should carry a success notification"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn api_field_rejection_maps_onto_the_form() {
        let router = Router::new().route(
            "/api/auth/register/",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "username": ["A user with that username already exists."]
                    })),
                )
            }),
        );
        let api = spawn_stub_api(router).await;
        let state = CreateUserState { api };

        let response =
            create_user_endpoint(State(state), Extension(session()), Form(valid_input())).await;

        assert!(
            response.headers().get("hx-trigger").is_none(),
            "a rejected registration must not trigger a re-fetch"
        );

        let body = response_body_text(response).await;
        assert!(
            body.contains("A user with that username already exists."),
            "the API's field message should render like a local validation error"
        );
    }

    #[tokio::test]
    async fn unexpected_api_failure_keeps_the_draft_and_notifies() {
        let router = Router::new().route(
            "/api/auth/register/",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let api = spawn_stub_api(router).await;
        let state = CreateUserState { api };

        let response =
            create_user_endpoint(State(state), Extension(session()), Form(valid_input())).await;

        let body = response_body_text(response).await;
        assert!(
            body.contains("value=\"otieno\""),
            "the draft should be preserved for a retry"
        );
        assert!(
            body.contains("Failed to create user"),
            "response should carry a failure notification"
        );
    }
}
