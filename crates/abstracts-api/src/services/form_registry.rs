use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use abstracts_core::{AppError, Config};
use abstracts_services::{SubmissionWorkflow, WorkflowContext};
use uuid::Uuid;

/// Lifetime and capacity bounds of form sessions.
#[derive(Debug, Clone, Copy)]
pub struct FormLimits {
    pub idle_timeout: Duration,
    /// A form parked until sign-in holds its abstract in memory; it is
    /// dropped after this long even if the session is still being polled.
    pub parked_ttl: Duration,
    pub max_sessions: usize,
}

impl FormLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            idle_timeout: Duration::from_secs(config.form_session_idle_secs()),
            parked_ttl: Duration::from_secs(config.parked_form_ttl_secs()),
            max_sessions: config.max_form_sessions(),
        }
    }
}

struct FormEntry {
    workflow: Arc<SubmissionWorkflow>,
    last_used: Instant,
}

/// Server-side form sessions, one [`SubmissionWorkflow`] each.
///
/// A form session lives from `create` until it is removed, sits idle for
/// longer than `idle_timeout`, or stays parked for longer than `parked_ttl`.
/// At most `max_sessions` live at once. Removing a session cancels its
/// workflow.
#[derive(Clone)]
pub struct FormRegistry {
    ctx: WorkflowContext,
    limits: FormLimits,
    forms: Arc<Mutex<HashMap<Uuid, FormEntry>>>,
}

impl FormRegistry {
    pub fn new(ctx: WorkflowContext, limits: FormLimits) -> Self {
        Self {
            ctx,
            limits,
            forms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Open a form session. When the registry is full, expired sessions are
    /// swept first; if none can go the request is turned away.
    pub fn create(&self) -> Result<(Uuid, Arc<SubmissionWorkflow>), AppError> {
        if self.len() >= self.limits.max_sessions {
            self.evict_idle();
        }

        let id = Uuid::new_v4();
        let workflow = Arc::new(SubmissionWorkflow::new(self.ctx.clone()));
        {
            let mut forms = self.lock();
            if forms.len() >= self.limits.max_sessions {
                tracing::warn!(
                    max_sessions = self.limits.max_sessions,
                    "Form session limit reached"
                );
                return Err(AppError::Unavailable(format!(
                    "Form session limit of {} reached",
                    self.limits.max_sessions
                )));
            }
            forms.insert(
                id,
                FormEntry {
                    workflow: workflow.clone(),
                    last_used: Instant::now(),
                },
            );
        }
        tracing::debug!(form_id = %id, "Form session created");
        Ok((id, workflow))
    }

    /// Workflow of form `id`, refreshing its idle clock.
    pub fn get(&self, id: Uuid) -> Option<Arc<SubmissionWorkflow>> {
        let mut forms = self.lock();
        let entry = forms.get_mut(&id)?;
        entry.last_used = Instant::now();
        Some(entry.workflow.clone())
    }

    /// Cancel and forget form `id`. Returns false when it did not exist.
    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self.lock().remove(&id);
        match removed {
            Some(entry) => {
                entry.workflow.cancel();
                tracing::debug!(form_id = %id, "Form session removed");
                true
            }
            None => false,
        }
    }

    /// Drop sessions idle for longer than the idle timeout and parked forms
    /// older than the parked TTL. Sessions with an attempt in flight are kept.
    /// Returns how many were evicted.
    pub fn evict_idle(&self) -> usize {
        let evicted: Vec<(Uuid, FormEntry)> = {
            let mut forms = self.lock();
            let stale: Vec<Uuid> = forms
                .iter()
                .filter(|(_, entry)| self.is_expired(entry))
                .map(|(id, _)| *id)
                .collect();
            stale
                .into_iter()
                .filter_map(|id| forms.remove(&id).map(|entry| (id, entry)))
                .collect()
        };

        for (id, entry) in &evicted {
            entry.workflow.cancel();
            tracing::debug!(form_id = %id, "Idle form session evicted");
        }
        evicted.len()
    }

    fn is_expired(&self, entry: &FormEntry) -> bool {
        if entry.workflow.state().is_busy() {
            return false;
        }
        let parked_too_long = entry
            .workflow
            .parked_for()
            .is_some_and(|parked| parked >= self.limits.parked_ttl);
        parked_too_long || entry.last_used.elapsed() >= self.limits.idle_timeout
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, FormEntry>> {
        self.forms.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
