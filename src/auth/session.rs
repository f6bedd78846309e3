//! The authenticated session restored from the token cookie.

use axum_extra::extract::PrivateCookieJar;

use crate::{
    api::ApiClient,
    endpoints,
    user::{Role, User},
};

use super::{cookie::get_token_from_cookies, token::AccessToken};

/// The authenticated identity for one request: the bearer token and the
/// profile the finance API resolved for it.
///
/// The auth guard attaches a `Session` to every protected request as an
/// extension; a request either carries a complete session or was redirected
/// before its handler ran.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    /// The token that authorizes calls to the finance API.
    pub(crate) token: AccessToken,
    /// The account the token belongs to.
    pub(crate) profile: User,
}

/// Rebuild the session for a request from the token cookie.
///
/// The token is verified with the finance API before the profile is fetched.
/// Any failure along the way resolves to a logged-out state rather than an
/// error: the caller should invalidate the cookie and redirect to the log-in
/// page.
pub(crate) async fn restore_session(jar: &PrivateCookieJar, api: &ApiClient) -> Option<Session> {
    let token = get_token_from_cookies(jar)?;

    if let Err(error) = api.verify_token(&token).await {
        tracing::debug!("stored token failed verification: {error}");
        return None;
    }

    match api.fetch_profile(&token).await {
        Ok(profile) => Some(Session { token, profile }),
        Err(error) => {
            tracing::warn!("could not fetch the profile for a verified token: {error}");
            None
        }
    }
}

/// The page a user lands on straight after logging in.
pub(crate) fn landing_route(role: Role) -> &'static str {
    match role {
        Role::Admin => endpoints::ADMIN_VIEW,
        Role::Finance => endpoints::TRANSACTIONS_VIEW,
    }
}

#[cfg(test)]
mod session_tests {
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::get,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use serde_json::json;
    use sha2::{Digest, Sha512};

    use crate::{
        auth::{
            cookie::{DEFAULT_COOKIE_DURATION, set_auth_cookie},
            token::AccessToken,
        },
        endpoints,
        test_utils::{sample_user_json, spawn_stub_api},
        user::{Role, UserId},
    };

    use super::{landing_route, restore_session};

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"42");
        PrivateCookieJar::new(Key::from(&hash))
    }

    fn jar_with_token(token: &str) -> PrivateCookieJar {
        set_auth_cookie(
            get_jar(),
            &AccessToken::new(token.to_owned()),
            DEFAULT_COOKIE_DURATION,
        )
    }

    fn stub_auth_router(expected_token: &'static str) -> Router {
        Router::new()
            .route(
                "/api/auth/token/verify/",
                get(move |headers: axum::http::HeaderMap| async move {
                    let authorized = headers
                        .get("authorization")
                        .and_then(|value| value.to_str().ok())
                        == Some(&format!("Bearer {expected_token}"));
                    if authorized {
                        StatusCode::OK
                    } else {
                        StatusCode::UNAUTHORIZED
                    }
                }),
            )
            .route(
                "/api/auth/profile/",
                get(|| async { Json(sample_user_json(1, "mwangi", "ADMIN")) }),
            )
    }

    #[tokio::test]
    async fn restore_with_no_cookie_is_logged_out() {
        let api = spawn_stub_api(stub_auth_router("token-123")).await;

        let session = restore_session(&get_jar(), &api).await;

        assert!(session.is_none());
    }

    #[tokio::test]
    async fn restore_with_valid_token_resolves_profile() {
        let api = spawn_stub_api(stub_auth_router("token-123")).await;

        let session = restore_session(&jar_with_token("token-123"), &api)
            .await
            .expect("session should restore with a valid token");

        assert_eq!(session.profile.id, UserId::new(1));
        assert_eq!(session.profile.role, Role::Admin);
        assert_eq!(session.token.as_str(), "token-123");
    }

    #[tokio::test]
    async fn restore_with_rejected_token_is_logged_out() {
        let api = spawn_stub_api(stub_auth_router("token-123")).await;

        let session = restore_session(&jar_with_token("stale-token"), &api).await;

        assert!(session.is_none());
    }

    #[tokio::test]
    async fn restore_with_failing_profile_fetch_is_logged_out() {
        let router = Router::new()
            .route("/api/auth/token/verify/", get(|| async { StatusCode::OK }))
            .route(
                "/api/auth/profile/",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"detail": "boom"})),
                    )
                }),
            );
        let api = spawn_stub_api(router).await;

        let session = restore_session(&jar_with_token("token-123"), &api).await;

        assert!(session.is_none());
    }

    #[test]
    fn treasurer_lands_on_the_admin_page() {
        assert_eq!(landing_route(Role::Admin), endpoints::ADMIN_VIEW);
    }

    #[test]
    fn finance_team_lands_on_the_transactions_page() {
        assert_eq!(landing_route(Role::Finance), endpoints::TRANSACTIONS_VIEW);
    }
}
