//! Domain route groups (auth, catalogs, forms, submissions).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/auth/signup", API_PREFIX), post(handlers::auth::sign_up))
        .route(&format!("{}/auth/signin", API_PREFIX), post(handlers::auth::sign_in))
        .route(&format!("{}/auth/signout", API_PREFIX), post(handlers::auth::sign_out))
        .route(
            &format!("{}/auth/session", API_PREFIX),
            get(handlers::auth::current_session),
        )
}

pub fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/geo/regions", API_PREFIX), get(handlers::geo::list_regions))
        .route(
            &format!("{}/geo/regions/{{id}}/municipalities", API_PREFIX),
            get(handlers::geo::list_municipalities),
        )
        .route(&format!("{}/areas", API_PREFIX), get(handlers::areas::list_areas))
}

pub fn form_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/forms", API_PREFIX), post(handlers::forms::create_form))
        .route(
            &format!("{}/forms/{{id}}", API_PREFIX),
            get(handlers::forms::get_form).delete(handlers::forms::delete_form),
        )
        .route(
            &format!("{}/forms/{{id}}/submit", API_PREFIX),
            post(handlers::forms::submit_form),
        )
        .route(
            &format!("{}/forms/{{id}}/resume", API_PREFIX),
            post(handlers::forms::resume_form),
        )
        .route(
            &format!("{}/forms/{{id}}/acknowledge", API_PREFIX),
            post(handlers::forms::acknowledge_form),
        )
}

pub fn submission_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/submissions/{{code}}", API_PREFIX),
            get(handlers::submissions::get_submission_status),
        )
        .route(
            &format!("{}/submissions/{{code}}/receipt", API_PREFIX),
            get(handlers::submissions::get_submission_receipt),
        )
}
