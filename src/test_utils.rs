#![allow(missing_docs)]
//! Shared helpers for unit tests: an in-process stand-in for the finance
//! API, canned records, and HTML parsing assertions.

use axum::{Router, response::Response};
use reqwest::Url;
use scraper::Html;
use serde_json::{Value, json};
use time::macros::datetime;

use crate::{
    AppState,
    api::ApiClient,
    transaction::{Category, PaymentType, Transaction, TransactionId, TransactionStatus},
    user::{Role, User, UserId},
};

/// Serve `router` as a stand-in finance API on an ephemeral port and return
/// a client pointed at it.
pub(crate) async fn spawn_stub_api(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind the stub API listener");
    let addr = listener
        .local_addr()
        .expect("the stub API listener has no local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("the stub API server exited");
    });

    let base_url = Url::parse(&format!("http://{addr}")).expect("the stub API URL should parse");

    ApiClient::new(base_url).expect("could not build the API client")
}

/// An [AppState] wired to a stub finance API serving `router`.
pub(crate) async fn test_app_state(router: Router) -> AppState {
    AppState::new(spawn_stub_api(router).await, "test-secret")
}

pub(crate) fn sample_user_json(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.org"),
        "first_name": "Grace",
        "last_name": "Mwangi",
        "role": role,
        "is_active": true,
    })
}

pub(crate) fn sample_transaction_json(id: i64) -> Value {
    json!({
        "id": id,
        "member_name": "John Kamau",
        "phone_number": null,
        "amount": 500.0,
        "category": "TITHE",
        "payment_type": "CASH",
        "status": "PENDING",
        "created_at": "2026-01-05T14:30:00+03:00",
    })
}

pub(crate) fn sample_user(id: i64, role: Role) -> User {
    User {
        id: UserId::new(id),
        username: "mwangi".to_owned(),
        email: "mwangi@example.org".to_owned(),
        first_name: "Grace".to_owned(),
        last_name: "Mwangi".to_owned(),
        role,
        is_active: true,
    }
}

pub(crate) fn sample_transaction(id: i64, status: TransactionStatus) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        member_name: "John Kamau".to_owned(),
        phone_number: None,
        amount: 500.0,
        category: Category::Tithe,
        payment_type: PaymentType::Cash,
        status,
        created_at: datetime!(2026-01-05 14:30:00 +03:00),
    }
}

pub(crate) fn parse_html_fragment(text: &str) -> Html {
    Html::parse_fragment(text)
}

pub(crate) async fn response_body_text(response: Response) -> String {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("could not read the response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_response_html(response: Response) -> Html {
    Html::parse_document(&response_body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}
