//! Implements a struct that holds the state of the console server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{api::ApiClient, auth::DEFAULT_COOKIE_DURATION};

/// The state of the console server.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which the token cookie is valid.
    pub cookie_duration: Duration,

    /// The client for the church finance REST API.
    pub api: ApiClient,
}

impl AppState {
    /// Create a new [AppState] around a finance API client.
    ///
    /// `cookie_secret` seeds the key that signs and encrypts the token
    /// cookie; it must be identical across restarts for existing sessions to
    /// survive them.
    pub fn new(api: ApiClient, cookie_secret: &str) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            api,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod app_state_tests {
    use super::create_cookie_key;

    #[test]
    fn cookie_key_is_deterministic_for_a_secret() {
        let first = create_cookie_key("a-secret");
        let second = create_cookie_key("a-secret");

        assert_eq!(first.master(), second.master());
    }

    #[test]
    fn different_secrets_produce_different_keys() {
        let first = create_cookie_key("a-secret");
        let second = create_cookie_key("another-secret");

        assert_ne!(first.master(), second.master());
    }
}
