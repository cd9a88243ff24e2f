use crate::auth::{AuthSession, BearerToken, SessionResponse};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use abstracts_core::models::Account;
use abstracts_core::validation::{validate_credentials, Credentials};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "Account created; the caller still has to sign in", body = Account),
        (status = 400, description = "Rejected by the identity provider (e.g. already registered)", body = ErrorResponse),
        (status = 422, description = "Invalid email or password", body = ErrorResponse)
    )
)]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<(StatusCode, Json<Account>), HttpAppError> {
    let credentials = validate_credentials(&credentials)?;
    let account = state
        .gatekeeper()
        .sign_up(&credentials.email, &credentials.password)
        .await?;

    tracing::info!(user_id = %account.id, "Account created");
    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signin",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Signed in; use `token` as a bearer credential", body = SessionResponse),
        (status = 400, description = "Invalid login credentials", body = ErrorResponse),
        (status = 422, description = "Invalid email or password", body = ErrorResponse)
    )
)]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<Json<SessionResponse>, HttpAppError> {
    let credentials = validate_credentials(&credentials)?;
    let session = state
        .gatekeeper()
        .sign_in(&credentials.email, &credentials.password)
        .await?;

    Ok(Json(SessionResponse::with_token(session)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signout",
    tag = "auth",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "Missing bearer token", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
) -> Result<StatusCode, HttpAppError> {
    let token = token.required()?;
    state.gatekeeper().sign_out(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "The caller's active session", body = SessionResponse),
        (status = 401, description = "No active session", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn current_session(AuthSession(session): AuthSession) -> Json<SessionResponse> {
    Json(SessionResponse::from(session))
}
