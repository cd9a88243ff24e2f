//! Account helpers for API tests.

use super::api_path;
use axum_test::TestServer;
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "segredo-forte";

/// Sign up `email` and sign in, returning the bearer token.
pub async fn register_and_sign_in(client: &TestServer, email: &str) -> String {
    let body = json!({ "email": email, "password": TEST_PASSWORD });

    let response = client.post(&api_path("/auth/signup")).json(&body).await;
    assert_eq!(response.status_code(), 201, "signup: {}", response.text());

    let response = client.post(&api_path("/auth/signin")).json(&body).await;
    assert_eq!(response.status_code(), 200, "signin: {}", response.text());

    let session: Value = response.json();
    session["token"]
        .as_str()
        .expect("sign-in returns a token")
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
