//! The HTTP client for the church finance REST API.
//!
//! This adapter owns transport details only: request serialisation, the
//! bearer header, timeout and status mapping, and JSON decoding into the
//! console's record types.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::AccessToken,
    transaction::{NewTransaction, Transaction, TransactionFilters, TransactionId},
    user::{Credentials, NewUser, Role, User, UserId},
};

use super::error::{ApiError, FieldErrors};

const TOKEN_PATH: &str = "/api/auth/token/";
const TOKEN_VERIFY_PATH: &str = "/api/auth/token/verify/";
const PROFILE_PATH: &str = "/api/auth/profile/";
const USERS_PATH: &str = "/api/auth/users/";
const REGISTER_PATH: &str = "/api/auth/register/";
const TRANSACTIONS_PATH: &str = "/api/transactions/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The client for the finance API, one method per upstream endpoint.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: String,
}

impl ApiClient {
    /// Create a client for the finance API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|error| ApiError::Transport(error.to_string()))
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Rejected credentials surface as [ApiError::Unauthorized].
    pub async fn log_in(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        let response = self
            .client
            .post(self.endpoint(TOKEN_PATH)?)
            .json(credentials)
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;
        let token: TokenResponse = decode(response).await?;

        Ok(AccessToken::new(token.access))
    }

    /// Check that a stored token is still accepted by the API.
    pub async fn verify_token(&self, token: &AccessToken) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.endpoint(TOKEN_VERIFY_PATH)?)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;

        Ok(())
    }

    /// Fetch the account record of the token's owner.
    pub async fn fetch_profile(&self, token: &AccessToken) -> Result<User, ApiError> {
        let response = self
            .client
            .get(self.endpoint(PROFILE_PATH)?)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;

        decode(response).await
    }

    /// List every account. Treasurer only.
    pub async fn list_users(&self, token: &AccessToken) -> Result<Vec<User>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(USERS_PATH)?)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;

        decode(response).await
    }

    /// Register a new account. The console re-fetches the list afterwards
    /// rather than relying on the response body.
    pub async fn register_user(
        &self,
        token: &AccessToken,
        new_user: &NewUser,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint(REGISTER_PATH)?)
            .bearer_auth(token.as_str())
            .json(new_user)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;

        Ok(())
    }

    /// Change an account's role.
    pub async fn update_role(
        &self,
        token: &AccessToken,
        user_id: UserId,
        role: Role,
    ) -> Result<(), ApiError> {
        let path = format!("/api/auth/users/{}/role/", user_id.as_i64());
        let response = self
            .client
            .patch(self.endpoint(&path)?)
            .bearer_auth(token.as_str())
            .json(&json!({ "role": role }))
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;

        Ok(())
    }

    /// Fetch the transaction list scoped by `filters`.
    pub async fn list_transactions(
        &self,
        token: &AccessToken,
        filters: TransactionFilters,
    ) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(TRANSACTIONS_PATH)?)
            .bearer_auth(token.as_str())
            .query(&filters.to_query())
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;

        decode(response).await
    }

    /// Record a new transaction and return the created record as the API
    /// reports it, so the console can show it without a re-fetch.
    pub async fn create_transaction(
        &self,
        token: &AccessToken,
        new_transaction: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        let response = self
            .client
            .post(self.endpoint(TRANSACTIONS_PATH)?)
            .bearer_auth(token.as_str())
            .json(new_transaction)
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;

        decode(response).await
    }

    /// Mark a pending transaction as completed.
    pub async fn complete_transaction(
        &self,
        token: &AccessToken,
        transaction_id: TransactionId,
    ) -> Result<(), ApiError> {
        let path = format!("/api/transactions/{}/complete/", transaction_id.as_i64());
        let response = self
            .client
            .post(self.endpoint(&path)?)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;

        Ok(())
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
        StatusCode::BAD_REQUEST => {
            let body = response.bytes().await.map_err(transport)?;

            match serde_json::from_slice::<FieldErrors>(&body) {
                Ok(fields) if !fields.is_empty() => Err(ApiError::Rejected(fields)),
                _ => Err(ApiError::UnexpectedStatus(status)),
            }
        }
        status => Err(ApiError::UnexpectedStatus(status)),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|error| ApiError::Decode(error.to_string()))
}

#[cfg(test)]
mod api_client_tests {
    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::{get, patch, post},
    };
    use serde_json::json;

    use crate::{
        api::error::ApiError,
        auth::AccessToken,
        test_utils::{sample_transaction_json, spawn_stub_api},
        transaction::{TransactionFilters, TransactionId},
        user::{Credentials, Role, UserId},
    };

    fn bearer(headers: &HeaderMap) -> Option<&str> {
        headers.get("authorization").and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn log_in_returns_access_token() {
        let router = Router::new().route(
            "/api/auth/token/",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["username"], "mwangi");
                Json(json!({ "access": "token-123" }))
            }),
        );
        let api = spawn_stub_api(router).await;

        let token = api
            .log_in(&Credentials {
                username: "mwangi".to_owned(),
                password: "hunter2".to_owned(),
            })
            .await
            .unwrap();

        assert_eq!(token.as_str(), "token-123");
    }

    #[tokio::test]
    async fn log_in_maps_rejection_to_unauthorized() {
        let router = Router::new().route(
            "/api/auth/token/",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "detail": "No active account found" })),
                )
            }),
        );
        let api = spawn_stub_api(router).await;

        let result = api
            .log_in(&Credentials {
                username: "mwangi".to_owned(),
                password: "wrong".to_owned(),
            })
            .await;

        assert_eq!(result, Err(ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn verify_token_sends_bearer_header() {
        let router = Router::new().route(
            "/api/auth/token/verify/",
            get(|headers: HeaderMap| async move {
                if bearer(&headers) == Some("Bearer token-123") {
                    StatusCode::OK
                } else {
                    StatusCode::UNAUTHORIZED
                }
            }),
        );
        let api = spawn_stub_api(router).await;

        assert!(
            api.verify_token(&AccessToken::new("token-123".to_owned()))
                .await
                .is_ok()
        );
        assert_eq!(
            api.verify_token(&AccessToken::new("stale".to_owned())).await,
            Err(ApiError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn list_transactions_forwards_the_full_filter_set() {
        let router = Router::new().route(
            "/api/transactions/",
            get(
                |Query(params): Query<Vec<(String, String)>>| async move {
                    assert_eq!(
                        params,
                        vec![
                            ("category".to_owned(), "TITHE".to_owned()),
                            ("status".to_owned(), "PENDING".to_owned()),
                        ]
                    );
                    Json(json!([sample_transaction_json(1)]))
                },
            ),
        );
        let api = spawn_stub_api(router).await;

        let filters: TransactionFilters =
            serde_urlencoded::from_str("category=TITHE&status=PENDING").unwrap();
        let transactions = api
            .list_transactions(&AccessToken::new("token".to_owned()), filters)
            .await
            .unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, TransactionId::new(1));
    }

    #[tokio::test]
    async fn create_transaction_returns_created_record() {
        let router = Router::new().route(
            "/api/transactions/",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["member_name"], "John Kamau");
                assert_eq!(body["payment_type"], "CASH");
                (
                    StatusCode::CREATED,
                    Json(sample_transaction_json(9)),
                )
            }),
        );
        let api = spawn_stub_api(router).await;

        let transaction = api
            .create_transaction(
                &AccessToken::new("token".to_owned()),
                &crate::transaction::NewTransaction {
                    member_name: "John Kamau".to_owned(),
                    phone_number: String::new(),
                    amount: 500.0,
                    category: crate::transaction::Category::Tithe,
                    payment_type: crate::transaction::PaymentType::Cash,
                },
            )
            .await
            .unwrap();

        assert_eq!(transaction.id, TransactionId::new(9));
    }

    #[tokio::test]
    async fn field_keyed_rejection_is_surfaced_as_rejected() {
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

        let result = api
            .register_user(
                &AccessToken::new("token".to_owned()),
                &crate::user::NewUser {
                    username: "mwangi".to_owned(),
                    email: "mwangi@example.org".to_owned(),
                    first_name: String::new(),
                    last_name: String::new(),
                    password: "pw".to_owned(),
                    password2: "pw".to_owned(),
                    role: Role::Finance,
                },
            )
            .await;

        let Err(ApiError::Rejected(fields)) = result else {
            panic!("want ApiError::Rejected, got {result:?}");
        };
        assert_eq!(
            fields.first("username"),
            Some("A user with that username already exists.")
        );
    }

    #[tokio::test]
    async fn update_role_patches_the_role_path() {
        let router = Router::new().route(
            "/api/auth/users/{user_id}/role/",
            patch(
                |axum::extract::Path(user_id): axum::extract::Path<i64>,
                 Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(user_id, 7);
                    assert_eq!(body["role"], "ADMIN");
                    StatusCode::OK
                },
            ),
        );
        let api = spawn_stub_api(router).await;

        api.update_role(
            &AccessToken::new("token".to_owned()),
            UserId::new(7),
            Role::Admin,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn complete_transaction_posts_the_completion_path() {
        let router = Router::new().route(
            "/api/transactions/{transaction_id}/complete/",
            post(
                |axum::extract::Path(transaction_id): axum::extract::Path<i64>| async move {
                    assert_eq!(transaction_id, 12);
                    Json(json!({ "status": "Transaction completed successfully." }))
                },
            ),
        );
        let api = spawn_stub_api(router).await;

        api.complete_transaction(
            &AccessToken::new("token".to_owned()),
            TransactionId::new(12),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn unexpected_status_is_reported_as_is() {
        let router = Router::new().route(
            "/api/auth/profile/",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let api = spawn_stub_api(router).await;

        let result = api.fetch_profile(&AccessToken::new("token".to_owned())).await;

        assert_eq!(
            result,
            Err(ApiError::UnexpectedStatus(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR
            ))
        );
    }

    #[tokio::test]
    async fn unreachable_api_is_a_transport_error() {
        // Port 9 (discard) is near-certain to refuse connections.
        let api = crate::ApiClient::new("http://127.0.0.1:9".parse().unwrap()).unwrap();

        let result = api.verify_token(&AccessToken::new("token".to_owned())).await;

        assert!(
            matches!(result, Err(ApiError::Transport(_))),
            "want transport error, got {result:?}"
        );
    }
}
