//! Catalog, health and documentation endpoints.

mod helpers;

use helpers::{api_path, setup_test_app};
use serde_json::Value;

#[tokio::test]
async fn test_list_regions() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/geo/regions")).await;

    assert_eq!(response.status_code(), 200);
    let regions: Vec<Value> = response.json();
    let siglas: Vec<&str> = regions
        .iter()
        .filter_map(|region| region["sigla"].as_str())
        .collect();
    assert!(siglas.contains(&"SP"));
    assert!(siglas.contains(&"MG"));
}

#[tokio::test]
async fn test_list_municipalities_of_region() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/geo/regions/35/municipalities"))
        .await;

    assert_eq!(response.status_code(), 200);
    let municipalities: Vec<Value> = response.json();
    let names: Vec<&str> = municipalities
        .iter()
        .filter_map(|m| m["nome"].as_str())
        .collect();
    assert!(names.contains(&"Campinas"));
    assert!(!names.contains(&"Uberlândia"));
    assert_eq!(app.geo.municipality_requests(), 1);
}

#[tokio::test]
async fn test_list_areas() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/areas")).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["version"].is_string());
    let areas = body["areas"].as_array().expect("areas array");
    assert!(areas.iter().any(|area| area == "Corrosão"));
}

#[tokio::test]
async fn test_health_reports_components() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["form_sessions"], 0);
}

#[tokio::test]
async fn test_health_unhealthy_without_database() {
    let app = setup_test_app().await;
    app.store.set_unavailable(true);

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/live").await;

    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/api/v1/forms/{id}/submit"].is_object());
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/areas")).await;

    let headers = response.headers();
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(
        headers
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}
