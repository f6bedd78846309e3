//! The bearer token issued by the finance API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque bearer token for the finance API.
///
/// The console never inspects the token; it only stores it in the private
/// cookie and replays it on every authorized call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token string received from the finance API.
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token value for the Authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// The token authorizes every API call, so keep its value out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[cfg(test)]
mod token_tests {
    use super::AccessToken;

    #[test]
    fn debug_output_does_not_leak_the_token() {
        let token = AccessToken::new("very-secret-token".to_owned());

        let debug = format!("{token:?}");

        assert!(!debug.contains("very-secret-token"), "got {debug}");
    }

    #[test]
    fn serializes_as_a_bare_string() {
        let token = AccessToken::new("abc".to_owned());

        assert_eq!(serde_json::to_string(&token).unwrap(), r#""abc""#);
    }
}
