//! Authentication middleware that restores sessions from the token cookie
//! and handles the role-based redirects for protected routes.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;

use crate::{AppState, api::ApiClient, endpoints, user::Role};

use super::{
    cookie::invalidate_auth_cookie,
    session::{Session, restore_session},
};

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The client for the finance API that verifies tokens and resolves
    /// profiles.
    pub api: ApiClient,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            api: state.api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that restores the session from the token cookie.
///
/// On success the [Session] is placed into the request as an extension and
/// the request runs normally. On any failure the cookie is invalidated and
/// the client is redirected to the log-in page using `get_redirect`.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session): Extension<Session>` to receive the session.
#[inline]
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Redirecting to log in page.");
            return get_redirect(endpoints::LOG_IN_VIEW);
        }
    };

    let Some(session) = restore_session(&jar, &state.api).await else {
        let jar = invalidate_auth_cookie(jar);
        return (jar, get_redirect(endpoints::LOG_IN_VIEW)).into_response();
    };

    parts.extensions.insert(session);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

/// Middleware function that restores the session from the token cookie,
/// redirecting to the log-in page via a `Location` header when the session
/// cannot be restored.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Middleware function that restores the session from the token cookie,
/// redirecting to the log-in page via the `HX-Redirect` header so htmx
/// performs a full page navigation.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}

#[inline]
async fn admin_guard_internal(
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let Some(session) = request.extensions().get::<Session>() else {
        tracing::error!("admin guard ran without a session extension; is the auth guard missing?");
        return get_redirect(endpoints::LOG_IN_VIEW);
    };

    if session.profile.role != Role::Admin {
        return get_redirect(endpoints::TRANSACTIONS_VIEW);
    }

    next.run(request).await
}

/// Middleware function that lets only treasurer sessions through, sending
/// finance-role users to the transactions page rather than the log-in page.
///
/// Must be layered inside [auth_guard] so the session extension is present.
pub async fn admin_guard(request: Request, next: Next) -> Response {
    admin_guard_internal(request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// The [admin_guard] variant for htmx endpoints, redirecting via the
/// `HX-Redirect` header.
pub async fn admin_guard_hx(request: Request, next: Next) -> Response {
    admin_guard_internal(request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
