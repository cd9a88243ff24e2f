use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use abstracts_core::models::{NewSubmission, Submission};
use abstracts_core::{CodeFormat, SubmissionCode};
use abstracts_db::{StoreError, SubmissionStore};
use chrono::Utc;

use super::error::SubmissionError;

/// Step the assigner is entering, reported to the caller for state tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignPhase {
    AssigningCode,
    Persisting,
}

/// Issues a code and inserts the record under it.
///
/// Uniqueness is enforced by the store. A duplicate-code rejection triggers a
/// new attempt with a fresh, strictly larger ordinal; every other store error
/// ends the assignment immediately.
pub struct CodeAssigner {
    store: Arc<dyn SubmissionStore>,
    format: CodeFormat,
    max_attempts: u32,
    call_timeout: Duration,
}

impl CodeAssigner {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        format: CodeFormat,
        max_attempts: u32,
        call_timeout: Duration,
    ) -> Self {
        Self {
            store,
            format,
            max_attempts: max_attempts.max(1),
            call_timeout,
        }
    }

    pub async fn assign(
        &self,
        record: &NewSubmission,
        on_phase: &(dyn Fn(AssignPhase) + Send + Sync),
    ) -> Result<(SubmissionCode, Submission), SubmissionError> {
        let mut previous: Option<u64> = None;

        for attempt in 1..=self.max_attempts {
            on_phase(AssignPhase::AssigningCode);
            let fresh = self
                .timed(self.store.next_ordinal())
                .await
                .map_err(|e| SubmissionError::Persistence(e.to_string()))?;
            let ordinal = match previous {
                Some(p) => fresh.max(p + 1),
                None => fresh,
            };
            previous = Some(ordinal);
            let code = self.format.format(ordinal);

            on_phase(AssignPhase::Persisting);
            match self.timed(self.store.insert(record, &code, Utc::now())).await {
                Ok(submission) => {
                    tracing::info!(code = %code, attempt, "Submission recorded");
                    return Ok((code, submission));
                }
                Err(StoreError::DuplicateCode(_)) => {
                    tracing::debug!(code = %code, attempt, "Submission code taken, retrying");
                }
                Err(e) => return Err(SubmissionError::Persistence(e.to_string())),
            }
        }

        tracing::error!(attempts = self.max_attempts, "No free submission code");
        Err(SubmissionError::Persistence(format!(
            "No free submission code after {} attempts",
            self.max_attempts
        )))
    }

    async fn timed<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| StoreError::Unavailable("Store call timed out".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{new_submission, MockSubmissionStore};
    use std::sync::Mutex;

    fn assigner(store: &MockSubmissionStore, max_attempts: u32) -> CodeAssigner {
        CodeAssigner::new(
            Arc::new(store.clone()),
            CodeFormat::default(),
            max_attempts,
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_first_code_is_eng0001() {
        let store = MockSubmissionStore::new();
        let phases = Mutex::new(Vec::new());

        let (code, submission) = assigner(&store, 5)
            .assign(&new_submission("12345678900"), &|p| {
                phases.lock().unwrap().push(p)
            })
            .await
            .unwrap();

        assert_eq!(code.as_str(), "ENG0001");
        assert_eq!(submission.codigo_submissao, "ENG0001");
        assert_eq!(
            *phases.lock().unwrap(),
            vec![AssignPhase::AssigningCode, AssignPhase::Persisting]
        );
    }

    #[tokio::test]
    async fn test_duplicate_code_is_retried_with_larger_ordinal() {
        let store = MockSubmissionStore::new();
        store.fail_next_insert(StoreError::DuplicateCode("ENG0001".to_string()));
        let phases = Mutex::new(Vec::new());

        let (code, _) = assigner(&store, 5)
            .assign(&new_submission("12345678900"), &|p| {
                phases.lock().unwrap().push(p)
            })
            .await
            .unwrap();

        assert_eq!(code.as_str(), "ENG0002");
        assert_eq!(phases.lock().unwrap().len(), 4);
        assert_eq!(store.insert_calls(), 2);
    }

    #[tokio::test]
    async fn test_integrity_error_is_not_retried() {
        let store = MockSubmissionStore::new();
        store.fail_next_insert(StoreError::Integrity("null value in nome".to_string()));

        let err = assigner(&store, 5)
            .assign(&new_submission("12345678900"), &|_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, SubmissionError::Persistence(_)));
        assert_eq!(store.insert_calls(), 1);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_retries_become_persistence_error() {
        let store = MockSubmissionStore::new();
        for _ in 0..3 {
            store.fail_next_insert(StoreError::DuplicateCode("taken".to_string()));
        }

        let err = assigner(&store, 3)
            .assign(&new_submission("12345678900"), &|_| {})
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmissionError::Persistence("No free submission code after 3 attempts".to_string())
        );
        assert_eq!(store.insert_calls(), 3);
    }

    #[tokio::test]
    async fn test_code_widens_past_four_digits() {
        let store = MockSubmissionStore::with_ordinal_offset(12344);

        let (code, _) = assigner(&store, 5)
            .assign(&new_submission("12345678900"), &|_| {})
            .await
            .unwrap();

        assert_eq!(code.as_str(), "ENG12345");
    }

    #[tokio::test]
    async fn test_unavailable_store_is_persistence_error() {
        let store = MockSubmissionStore::new();
        store.set_unavailable(true);

        let err = assigner(&store, 5)
            .assign(&new_submission("12345678900"), &|_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, SubmissionError::Persistence(_)));
        assert_eq!(store.insert_calls(), 0);
    }
}
