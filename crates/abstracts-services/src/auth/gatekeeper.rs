use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use abstracts_core::models::{Account, Session, SessionEvent};
use chrono::Utc;

use super::{IdentityError, IdentityProvider};

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Front door to the identity provider.
///
/// Raises [`SessionEvent`]s on sign-in and sign-out. Sign-up creates the
/// account only: it never signs the user in and emits nothing.
#[derive(Clone)]
pub struct AuthGatekeeper {
    provider: Arc<dyn IdentityProvider>,
    listeners: Arc<Mutex<Listeners>>,
}

impl AuthGatekeeper {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Account, IdentityError> {
        self.provider.sign_up(email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let session = self.provider.sign_in(email, password).await?;
        self.emit(&SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), IdentityError> {
        let session = self.provider.get_session(token).await?;
        self.provider.sign_out(token).await?;

        if let Some(session) = session {
            self.emit(&SessionEvent::SignedOut {
                user_id: session.user_id,
            });
        }
        Ok(())
    }

    /// Session for `token`, or `None` when it is unknown or expired.
    pub async fn current_session(&self, token: &str) -> Result<Option<Session>, IdentityError> {
        let now = Utc::now();
        Ok(self
            .provider
            .get_session(token)
            .await?
            .filter(|s| !s.is_expired_at(now)))
    }

    /// Register a listener for session changes. It stays registered until the
    /// returned subscription is dropped.
    pub fn on_session_change<F>(&self, listener: F) -> SessionSubscription
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));

        SessionSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }

    fn emit(&self, event: &SessionEvent) {
        // Snapshot first: listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<Listener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::debug!(user_id = %event.user_id(), listeners = snapshot.len(), "Session change");

        for listener in snapshot {
            listener(event);
        }
    }
}

/// Handle to a session change listener; dropping it deregisters the listener.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct SessionSubscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl SessionSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).entries.retain(|(id, _)| *id != self.id);
        }
    }
}
