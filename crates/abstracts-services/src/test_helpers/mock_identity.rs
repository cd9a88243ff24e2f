//! Mock identity provider for testing

use crate::auth::{
    generate_session_token, IdentityError, IdentityProvider, INVALID_LOGIN_CREDENTIALS,
    USER_ALREADY_REGISTERED,
};
use abstracts_core::models::{Account, Session};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory accounts (keyed by lowercased email) and sessions (keyed by token).
///
/// `get_session` returns expired sessions as stored; expiry is the
/// gatekeeper's business.
#[derive(Clone, Default)]
pub struct MockIdentityProvider {
    accounts: Arc<Mutex<HashMap<String, (Account, String)>>>,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    unavailable: Arc<AtomicBool>,
    session_lookups: Arc<AtomicUsize>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session directly, bypassing sign-in. A negative `ttl`
    /// yields an already expired session.
    pub fn insert_session(&self, email: &str, ttl: Duration) -> Session {
        let user_id = self
            .accounts
            .lock()
            .unwrap()
            .get(&email.to_lowercase())
            .map(|(account, _)| account.id)
            .unwrap_or_else(Uuid::new_v4);

        let session = Session {
            token: generate_session_token(),
            user_id,
            email: email.to_string(),
            expires_at: Utc::now() + ttl,
        };
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        session
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `get_session` calls served so far.
    pub fn session_lookups(&self) -> usize {
        self.session_lookups.load(Ordering::SeqCst)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<(), IdentityError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IdentityError::Unavailable(
                "Mock identity provider offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Account, IdentityError> {
        self.check_available()?;
        let email = email.trim();
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&email.to_lowercase()) {
            return Err(IdentityError::Rejected(USER_ALREADY_REGISTERED.to_string()));
        }

        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        accounts.insert(
            email.to_lowercase(),
            (account.clone(), password.to_string()),
        );
        Ok(account)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        self.check_available()?;
        let account = self
            .accounts
            .lock()
            .unwrap()
            .get(&email.trim().to_lowercase())
            .filter(|(_, stored)| stored == password)
            .map(|(account, _)| account.clone())
            .ok_or_else(|| IdentityError::Rejected(INVALID_LOGIN_CREDENTIALS.to_string()))?;

        let session = Session {
            token: generate_session_token(),
            user_id: account.id,
            email: account.email,
            expires_at: Utc::now() + Duration::hours(1),
        };
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError> {
        self.check_available()?;
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<Session>, IdentityError> {
        self.session_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }
}
