use abstracts_core::models::{Account, Session};
use abstracts_db::{SessionRepository, UserRepository};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::token::{generate_session_token, hash_session_token};
use super::{IdentityError, IdentityProvider, INVALID_LOGIN_CREDENTIALS, USER_ALREADY_REGISTERED};

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String, IdentityError> {
    use rand_core::OsRng;
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IdentityError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, IdentityError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| IdentityError::Internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Email/password accounts with opaque, server-side sessions in PostgreSQL.
#[derive(Clone)]
pub struct PasswordIdentityProvider {
    users: UserRepository,
    sessions: SessionRepository,
    session_ttl: Duration,
}

impl PasswordIdentityProvider {
    pub fn new(users: UserRepository, sessions: SessionRepository, session_ttl: Duration) -> Self {
        Self {
            users,
            sessions,
            session_ttl,
        }
    }

    /// Delete sessions past their expiry. Returns how many were removed.
    pub async fn purge_expired(&self) -> Result<u64, IdentityError> {
        Ok(self.sessions.purge_expired(Utc::now()).await?)
    }
}

#[async_trait]
impl IdentityProvider for PasswordIdentityProvider {
    #[tracing::instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<Account, IdentityError> {
        let owned = password.to_string();
        // Argon2 is CPU-bound
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&owned))
            .await
            .map_err(|e| IdentityError::Internal(format!("Hashing task failed: {}", e)))??;

        match self.users.create(email.trim(), &password_hash).await? {
            Some(user) => {
                tracing::info!(user_id = %user.id, "Account created");
                Ok(user.to_account())
            }
            None => Err(IdentityError::Rejected(USER_ALREADY_REGISTERED.to_string())),
        }
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| IdentityError::Rejected(INVALID_LOGIN_CREDENTIALS.to_string()))?;

        let owned = password.to_string();
        let stored = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&owned, &stored))
            .await
            .map_err(|e| IdentityError::Internal(format!("Verification task failed: {}", e)))??;

        if !valid {
            return Err(IdentityError::Rejected(INVALID_LOGIN_CREDENTIALS.to_string()));
        }

        let token = generate_session_token();
        let expires_at = Utc::now() + self.session_ttl;
        self.sessions
            .create(&hash_session_token(&token), user.id, expires_at)
            .await?;

        tracing::info!(user_id = %user.id, "Signed in");

        Ok(Session {
            token,
            user_id: user.id,
            email: user.email,
            expires_at,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError> {
        if let Some(user_id) = self.sessions.revoke(&hash_session_token(token)).await? {
            tracing::info!(user_id = %user_id, "Signed out");
        }
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<Session>, IdentityError> {
        let record = self
            .sessions
            .find_active(&hash_session_token(token), Utc::now())
            .await?;

        Ok(record.map(|r| Session {
            token: token.to_string(),
            user_id: r.user_id,
            email: r.email,
            expires_at: r.expires_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("segredo123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("segredo123", &hash).unwrap());
        assert!(!verify_password("outra-senha", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("segredo123").unwrap();
        let b = hash_password("segredo123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let err = verify_password("segredo123", "not-a-hash").unwrap_err();
        assert!(matches!(err, IdentityError::Internal(_)));
    }
}
