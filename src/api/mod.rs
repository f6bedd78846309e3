//! The adapter over the church finance REST API.
//!
//! The console treats the API as the authoritative store: nothing is
//! persisted locally, and every page renders whatever the API reported for
//! that request.

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ApiError, FieldErrors};
