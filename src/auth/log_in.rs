//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The rest of the auth module handles the lower level token and cookie logic.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use time::Duration;

use crate::{
    AppState,
    api::{ApiClient, ApiError},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, auth_card, base,
        loading_spinner,
    },
    user::Credentials,
};

use super::{cookie::set_auth_cookie, session::landing_route};

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect username or password.";

const INTERNAL_ERROR_MSG: &str = "An internal error occurred. Please try again later.";

/// Renders the log-in form, preserving the typed username when an error is
/// shown.
fn log_in_form(username: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#username, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    type="text"
                    name="username"
                    id="username"
                    value=(username)
                    required
                    autofocus[username.is_empty()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="password" class=(FORM_LABEL_STYLE) { "Password" }

                input
                    type="password"
                    name="password"
                    id="password"
                    placeholder="••••••••"
                    required
                    autofocus[!username.is_empty()]
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(error_message) = error_message {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            button
                type="submit" id="submit-button" tabindex="0"
                class={ "w-full " (BUTTON_PRIMARY_STYLE) }
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log In"
            }
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    let form = log_in_form("", None);
    let content = auth_card("Sign in to the finance console", &form);

    base("Log In", &content).into_response()
}

/// The state needed to perform a log-in.
#[derive(Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which the token cookie is valid.
    pub cookie_duration: Duration,
    /// The client for the finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            api: state.api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// Handler for log-in requests via the POST method.
///
/// On success the token returned by the finance API is stored in the private
/// cookie, the caller's profile is fetched, and the client is redirected to
/// the landing page for their role: the admin page for the treasurer, the
/// transactions page for the finance team. Otherwise the form is returned
/// with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(credentials): Form<Credentials>,
) -> Response {
    let token = match state.api.log_in(&credentials).await {
        Ok(token) => token,
        Err(ApiError::Unauthorized) => {
            return log_in_form(&credentials.username, Some(INVALID_CREDENTIALS_ERROR_MSG))
                .into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while logging in: {error}");
            return log_in_form(&credentials.username, Some(INTERNAL_ERROR_MSG)).into_response();
        }
    };

    let profile = match state.api.fetch_profile(&token).await {
        Ok(profile) => profile,
        Err(error) => {
            tracing::error!("Could not fetch the profile after log-in: {error}");
            return log_in_form(&credentials.username, Some(INTERNAL_ERROR_MSG)).into_response();
        }
    };

    let jar = set_auth_cookie(jar, &token, state.cookie_duration);

    (
        StatusCode::SEE_OTHER,
        HxRedirect(landing_route(profile.role).to_owned()),
        jar,
    )
        .into_response()
}
