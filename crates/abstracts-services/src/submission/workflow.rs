use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use abstracts_core::models::{Session, Submission};
use abstracts_core::validation::{SubmissionForm, SubmissionSchema, ValidatedSubmission};
use abstracts_core::CodeFormat;
use abstracts_db::SubmissionStore;
use abstracts_storage::{abstract_key, Storage};
use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use super::code_assigner::{AssignPhase, CodeAssigner};
use super::error::SubmissionError;
use super::state::{FailureKind, SubmissionState};
use crate::auth::AuthGatekeeper;

/// Collaborators and settings shared by every workflow instance.
#[derive(Clone)]
pub struct WorkflowContext {
    pub storage: Arc<dyn Storage>,
    pub store: Arc<dyn SubmissionStore>,
    pub gatekeeper: AuthGatekeeper,
    pub schema: Arc<SubmissionSchema>,
    pub code_format: CodeFormat,
    /// Key prefix abstracts are uploaded under
    pub bucket: String,
    pub max_code_attempts: u32,
    /// Upper bound for each external call
    pub call_timeout: Duration,
}

/// A validated form waiting for sign-in.
struct Parked {
    submission: ValidatedSubmission,
    since: Instant,
}

/// One form's submission state machine.
///
/// ```text
/// Idle → Validating → AwaitingAuth ─resume→ Uploading → AssigningCode ⇄ Persisting → Succeeded
///             └→ Failed{Validation}           └→ Failed{Upload}            └→ Failed{Persistence}
/// ```
///
/// At most one attempt runs at a time; a submit or resume arriving while one
/// is in flight is rejected with [`SubmissionError::InProgress`].
pub struct SubmissionWorkflow {
    ctx: WorkflowContext,
    state: watch::Sender<SubmissionState>,
    attempt: tokio::sync::Mutex<()>,
    pending: Mutex<Option<Parked>>,
    cancel: CancellationToken,
}

impl SubmissionWorkflow {
    pub fn new(ctx: WorkflowContext) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            ctx,
            state,
            attempt: tokio::sync::Mutex::new(()),
            pending: Mutex::new(None),
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// True while a validated form is waiting for sign-in.
    pub fn has_pending(&self) -> bool {
        self.pending_lock().is_some()
    }

    /// How long the retained form has been waiting for sign-in.
    pub fn parked_for(&self) -> Option<Duration> {
        self.pending_lock().as_ref().map(|parked| parked.since.elapsed())
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run a full attempt for `form`. `token` is the caller's session token,
    /// if any; without an active session the workflow parks in `AwaitingAuth`.
    pub async fn submit(
        &self,
        form: &SubmissionForm,
        token: Option<&str>,
    ) -> Result<Submission, SubmissionError> {
        let _attempt = self.begin()?;
        if let SubmissionState::Succeeded { code } = self.state() {
            return Err(SubmissionError::AlreadySubmitted(code));
        }

        self.set_state(SubmissionState::Validating);
        let validated = match self.ctx.schema.validate(form) {
            Ok(validated) => validated,
            Err(fields) => {
                tracing::debug!(errors = %fields, "Submission rejected by validation");
                return Err(self.fail(
                    FailureKind::Validation {
                        fields: fields.clone(),
                    },
                    SubmissionError::Validation(fields),
                ));
            }
        };

        match self.check_session(token).await? {
            Some(session) => {
                self.pending_lock().take();
                tracing::debug!(user_id = %session.user_id, "Session active, uploading");
                self.run(validated).await
            }
            None => {
                *self.pending_lock() = Some(Parked {
                    submission: validated,
                    since: Instant::now(),
                });
                self.set_state(SubmissionState::AwaitingAuth);
                Err(SubmissionError::AuthRequired)
            }
        }
    }

    /// Continue a parked attempt once the user has signed in. The session is
    /// checked again; a missing one leaves the workflow in `AwaitingAuth`.
    pub async fn resume(&self, token: &str) -> Result<Submission, SubmissionError> {
        let _attempt = self.begin()?;
        if self.state() != SubmissionState::AwaitingAuth {
            return Err(SubmissionError::NotAwaitingAuth);
        }
        let validated = self
            .pending_lock()
            .as_ref()
            .map(|parked| parked.submission.clone())
            .ok_or(SubmissionError::NotAwaitingAuth)?;

        match self.check_session(Some(token)).await? {
            Some(_) => self.run(validated).await,
            None => Err(SubmissionError::AuthRequired),
        }
    }

    /// Wait for the next sign-in raised by the gatekeeper, then resume with
    /// that session. Meant for single-user clients; the subscription lives
    /// only as long as this call.
    pub async fn resume_on_sign_in(&self) -> Result<Submission, SubmissionError> {
        if self.state() != SubmissionState::AwaitingAuth {
            return Err(SubmissionError::NotAwaitingAuth);
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let subscription = self.ctx.gatekeeper.on_session_change(move |event| {
            if let Some(session) = event.session() {
                let _ = tx.send(session.token.clone());
            }
        });

        let token = self
            .cancellable(rx.recv())
            .await?
            .ok_or(SubmissionError::Cancelled)?;
        drop(subscription);

        self.resume(&token).await
    }

    /// Leave a finished or parked attempt and return to `Idle`, dropping any
    /// retained form.
    pub fn acknowledge(&self) -> Result<(), SubmissionError> {
        if self.cancel.is_cancelled() {
            return Err(SubmissionError::Cancelled);
        }
        let _attempt = self
            .attempt
            .try_lock()
            .map_err(|_| SubmissionError::InProgress)?;

        self.pending_lock().take();
        self.set_state(SubmissionState::Idle);
        Ok(())
    }

    /// Stop the in-flight attempt at its next suspension point. The workflow
    /// publishes no further state afterwards and accepts no new attempts.
    /// Files already uploaded are left in place.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(state = self.state().name(), "Submission workflow cancelled");
            self.cancel.cancel();
        }
    }

    fn begin(&self) -> Result<AttemptGuard<'_>, SubmissionError> {
        if self.cancel.is_cancelled() {
            return Err(SubmissionError::Cancelled);
        }
        let lock = self
            .attempt
            .try_lock()
            .map_err(|_| SubmissionError::InProgress)?;

        Ok(AttemptGuard {
            workflow: self,
            _lock: lock,
        })
    }

    async fn check_session(&self, token: Option<&str>) -> Result<Option<Session>, SubmissionError> {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };

        let result = self
            .cancellable(tokio::time::timeout(
                self.ctx.call_timeout,
                self.ctx.gatekeeper.current_session(token),
            ))
            .await?;

        let message = match result {
            Ok(Ok(session)) => return Ok(session),
            Ok(Err(e)) => e.to_string(),
            Err(_) => "Identity provider timed out".to_string(),
        };

        tracing::warn!(error = %message, "Session check failed");
        Err(self.fail(
            FailureKind::Auth {
                message: message.clone(),
            },
            SubmissionError::Auth(message),
        ))
    }

    async fn run(&self, validated: ValidatedSubmission) -> Result<Submission, SubmissionError> {
        self.set_state(SubmissionState::Uploading);

        let file = &validated.resumo;
        let key = abstract_key(
            &self.ctx.bucket,
            &validated.cpf,
            Utc::now().timestamp_millis(),
        );
        let upload = self
            .cancellable(tokio::time::timeout(
                self.ctx.call_timeout,
                self.ctx
                    .storage
                    .upload(&key, &file.content_type, file.data.clone()),
            ))
            .await?;

        let key = match upload {
            Ok(Ok(key)) => key,
            Ok(Err(e)) => {
                tracing::error!(error = %e, key = %key, "Abstract upload failed");
                return Err(self.fail(FailureKind::Upload, SubmissionError::Upload(e.to_string())));
            }
            Err(_) => {
                tracing::error!(key = %key, "Abstract upload timed out");
                return Err(self.fail(
                    FailureKind::Upload,
                    SubmissionError::Upload("Upload timed out".to_string()),
                ));
            }
        };

        let pdf_url = self.ctx.storage.public_url(&key);
        let record = validated.to_record(pdf_url.clone());
        let assigner = CodeAssigner::new(
            self.ctx.store.clone(),
            self.ctx.code_format.clone(),
            self.ctx.max_code_attempts,
            self.ctx.call_timeout,
        );
        let on_phase = |phase: AssignPhase| {
            self.set_state(match phase {
                AssignPhase::AssigningCode => SubmissionState::AssigningCode,
                AssignPhase::Persisting => SubmissionState::Persisting,
            })
        };

        match self.cancellable(assigner.assign(&record, &on_phase)).await? {
            Ok((code, submission)) => {
                self.pending_lock().take();
                self.set_state(SubmissionState::Succeeded { code });
                Ok(submission)
            }
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    pdf_url = %pdf_url,
                    error = %e,
                    "Abstract uploaded but no record was stored; file is orphaned"
                );
                Err(self.fail(FailureKind::Persistence, e))
            }
        }
    }

    async fn cancellable<T>(&self, call: impl Future<Output = T>) -> Result<T, SubmissionError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SubmissionError::Cancelled),
            result = call => Ok(result),
        }
    }

    fn fail(&self, failure: FailureKind, err: SubmissionError) -> SubmissionError {
        self.set_state(SubmissionState::Failed { failure });
        err
    }

    fn set_state(&self, next: SubmissionState) {
        if self.cancel.is_cancelled() {
            return;
        }
        let to = next.name();
        let from = self.state.send_replace(next);
        tracing::debug!(from = from.name(), to, "Submission state changed");
    }

    fn pending_lock(&self) -> MutexGuard<'_, Option<Parked>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the single-flight lock for one attempt. An attempt dropped while
/// busy ends in `Failed{Cancelled}`.
struct AttemptGuard<'a> {
    workflow: &'a SubmissionWorkflow,
    _lock: tokio::sync::MutexGuard<'a, ()>,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if self.workflow.state.borrow().is_busy() {
            self.workflow.set_state(SubmissionState::Failed {
                failure: FailureKind::Cancelled,
            });
        }
    }
}
