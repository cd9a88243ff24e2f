//! Status inquiry and receipts by submission code.

mod helpers;

use helpers::auth::{bearer, register_and_sign_in};
use helpers::fixtures::valid_submission;
use helpers::{api_path, setup_test_app, TestApp};
use serde_json::Value;

async fn submit_one(app: &TestApp) -> String {
    let token = register_and_sign_in(app.client(), "maria@example.com").await;
    let form: Value = app.client().post(&api_path("/forms")).await.json();
    let id = form["id"].as_str().expect("form id").to_string();

    let response = app
        .client()
        .post(&api_path(&format!("/forms/{}/submit", id)))
        .add_header("Authorization", bearer(&token))
        .multipart(valid_submission("123.456.789-00"))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());

    let body: Value = response.json();
    body["codigo_submissao"]
        .as_str()
        .expect("submission code")
        .to_string()
}

#[tokio::test]
async fn test_status_omits_personal_data() {
    let app = setup_test_app().await;
    let code = submit_one(&app).await;

    let response = app
        .client()
        .get(&api_path(&format!("/submissions/{}", code)))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["codigo_submissao"], "ENG0001");
    assert_eq!(body["status"], "received");
    assert_eq!(body["cidade"], "Campinas");
    assert!(body.get("cpf").is_none());
    assert!(body.get("email").is_none());
    assert!(body.get("nome").is_none());
    assert!(body.get("pdf_url").is_none());
}

#[tokio::test]
async fn test_status_unknown_and_malformed_codes() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/submissions/ENG9999")).await;
    assert_eq!(response.status_code(), 404);

    let response = app.client().get(&api_path("/submissions/XYZ-1")).await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_receipt_json() {
    let app = setup_test_app().await;
    let code = submit_one(&app).await;

    let response = app
        .client()
        .get(&api_path(&format!("/submissions/{}/receipt", code)))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["code"], "ENG0001");
    assert!(body["file_name"]
        .as_str()
        .is_some_and(|name| name.ends_with("ENG0001.pdf")));
    assert!(body["instructions"].as_array().is_some_and(|i| !i.is_empty()));
}

#[tokio::test]
async fn test_receipt_text_download() {
    let app = setup_test_app().await;
    let code = submit_one(&app).await;

    let response = app
        .client()
        .get(&api_path(&format!("/submissions/{}/receipt", code)))
        .add_query_param("format", "text")
        .await;

    assert_eq!(response.status_code(), 200);
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("ENG0001.txt"));
    assert!(response.text().contains("ENG0001"));
}

#[tokio::test]
async fn test_receipt_unknown_format() {
    let app = setup_test_app().await;
    let code = submit_one(&app).await;

    let response = app
        .client()
        .get(&api_path(&format!("/submissions/{}/receipt", code)))
        .add_query_param("format", "xml")
        .await;

    assert_eq!(response.status_code(), 400);
}
