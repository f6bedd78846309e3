//! Error types for calls to the finance API.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Deserialize;

/// Per-field rejection messages from a failed mutating call.
///
/// The finance API rejects bad submissions with a JSON object keyed by field
/// name, each holding a list of messages, e.g.
/// `{"phone_number": ["Phone number is required for M-Pesa transactions."]}`.
/// Form endpoints map these onto the same error display as local validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// The first message reported for `field`, if any.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Whether the payload named any fields at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The field names the API rejected.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
impl FieldErrors {
    pub(crate) fn from_pairs<const N: usize>(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(field, message)| (field.to_owned(), vec![message.to_owned()]))
                .collect(),
        )
    }
}

/// The errors that may occur when calling the finance API.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ApiError {
    /// The access token was missing, expired or otherwise rejected.
    #[error("the access token was rejected by the finance API")]
    Unauthorized,

    /// The token was accepted but the caller's role does not permit the
    /// call.
    #[error("the caller is not permitted to perform this action")]
    Forbidden,

    /// The API rejected the submission with per-field messages.
    #[error("the finance API rejected the submitted fields")]
    Rejected(FieldErrors),

    /// The request never completed: connection failure, timeout, or a
    /// malformed URL.
    #[error("request to the finance API failed: {0}")]
    Transport(String),

    /// The API answered with a status the console does not know how to
    /// handle.
    #[error("the finance API returned unexpected status {0}")]
    UnexpectedStatus(StatusCode),

    /// The response body could not be decoded as the expected JSON shape.
    #[error("could not decode the finance API response: {0}")]
    Decode(String),
}
