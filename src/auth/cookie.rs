//! Defines functions for keeping the finance API's bearer token in a
//! private cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use super::token::AccessToken;

pub(crate) const COOKIE_TOKEN: &str = "token";

/// How long the token cookie lasts: one working day at the church office.
///
/// The token itself may expire sooner; the finance API has the final say on
/// every request.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::hours(12);

/// Add the token cookie to the cookie jar, indicating that a user is logged
/// in.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    token: &AccessToken,
    duration: Duration,
) -> PrivateCookieJar {
    let expiry = OffsetDateTime::now_utc() + duration;

    jar.add(
        Cookie::build((COOKIE_TOKEN, token.as_str().to_owned()))
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Set the token cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// The stored token, if the request carried one.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Option<AccessToken> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| AccessToken::new(cookie.value_trimmed().to_owned()))
}
