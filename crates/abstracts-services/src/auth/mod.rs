//! Authentication: identity provider seam, the password-based provider and
//! the gatekeeper that raises session change events.

mod gatekeeper;
mod password;
mod token;

pub use gatekeeper::{AuthGatekeeper, SessionSubscription};
pub use password::{hash_password, verify_password, PasswordIdentityProvider};
pub use token::{generate_session_token, hash_session_token};

use abstracts_core::models::{Account, Session};
use abstracts_core::AppError;
use async_trait::async_trait;

pub const USER_ALREADY_REGISTERED: &str = "User already registered";
pub const INVALID_LOGIN_CREDENTIALS: &str = "Invalid login credentials";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The provider refused the request; the message is shown to the user as is.
    #[error("{0}")]
    Rejected(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("Identity provider failure: {0}")]
    Internal(String),
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        IdentityError::Unavailable(err.to_string())
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Rejected(msg) => AppError::Auth(msg),
            IdentityError::Unavailable(msg) => AppError::Unavailable(msg),
            IdentityError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Account and session backend.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Account, IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    /// Revoke `token`. Unknown tokens are ignored.
    async fn sign_out(&self, token: &str) -> Result<(), IdentityError>;

    /// Active session for `token`; `None` when unknown, revoked or expired.
    async fn get_session(&self, token: &str) -> Result<Option<Session>, IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use abstracts_core::ErrorMetadata;

    #[test]
    fn test_rejection_message_is_verbatim() {
        let err = IdentityError::Rejected(USER_ALREADY_REGISTERED.to_string());
        assert_eq!(err.to_string(), "User already registered");

        let app: AppError = err.into();
        assert_eq!(app.to_string(), "User already registered");
        assert_eq!(app.http_status_code(), 400);
    }

    #[test]
    fn test_unavailable_maps_to_service_unavailable() {
        let app: AppError = IdentityError::Unavailable("pool timed out".to_string()).into();
        assert_eq!(app.http_status_code(), 503);
    }
}
