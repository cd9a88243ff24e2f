use std::sync::Arc;

use abstracts_core::models::Session;
use abstracts_core::AppError;
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Session token from `Authorization: Bearer <token>`, if the header is present.
///
/// The token is not checked here; the workflow and gatekeeper decide whether
/// it names an active session. A header that is not a bearer credential is
/// rejected with 401.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The token, or 401 when the request carried none.
    pub fn required(self) -> Result<String, HttpAppError> {
        self.0.ok_or_else(|| {
            HttpAppError(AppError::Unauthorized(
                "Missing bearer token".to_string(),
            ))
        })
    }
}

fn parse_bearer(parts: &Parts) -> Result<Option<String>, HttpAppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            HttpAppError(AppError::Unauthorized(
                "Authorization header must be 'Bearer <token>'".to_string(),
            ))
        })?;

    Ok(Some(token.to_string()))
}

// Implemented on parts so it composes with Multipart, which consumes the body.
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(parse_bearer(parts)?))
    }
}

/// An active session, resolved through the gatekeeper. Rejects with 401 when
/// the token is missing, unknown, revoked or expired.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = HttpAppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = BearerToken(parse_bearer(parts)?).required()?;

        state
            .gatekeeper()
            .current_session(&token)
            .await?
            .map(AuthSession)
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Sessão inválida ou expirada".to_string(),
                ))
            })
    }
}

/// Session as returned to clients. `token` is only present right after sign-in.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user_id: Uuid,
    #[schema(example = "autor@ufmg.br")]
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn with_token(session: Session) -> Self {
        Self {
            token: Some(session.token),
            user_id: session.user_id,
            email: session.email,
            expires_at: session.expires_at,
        }
    }
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: None,
            user_id: session.user_id,
            email: session.email,
            expires_at: session.expires_at,
        }
    }
}
