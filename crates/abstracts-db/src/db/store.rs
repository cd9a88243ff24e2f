use abstracts_core::models::{NewSubmission, Submission};
use abstracts_core::{AppError, SubmissionCode};
use chrono::{DateTime, Utc};
use sqlx::error::ErrorKind;

/// Name of the unique constraint guarding `submissoes.codigo_submissao`.
pub const CODE_UNIQUE_CONSTRAINT: &str = "submissoes_codigo_submissao_key";

/// Failures of the durable submission store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The code is already taken; retry with a fresh one.
    #[error("Submission code already in use: {0}")]
    DuplicateCode(String),

    /// Any other constraint rejection. Not retryable.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_duplicate_code(&self) -> bool {
        matches!(self, StoreError::DuplicateCode(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            return match db_err.kind() {
                ErrorKind::UniqueViolation if db_err.constraint() == Some(CODE_UNIQUE_CONSTRAINT) => {
                    StoreError::DuplicateCode(message)
                }
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => StoreError::Integrity(message),
                _ => StoreError::Unavailable(message),
            };
        }
        StoreError::Unavailable(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode(msg) => AppError::Conflict(msg),
            StoreError::Integrity(msg) => AppError::Persistence(msg),
            StoreError::Unavailable(msg) => AppError::Unavailable(msg),
        }
    }
}

/// Durable store of submissions.
///
/// Implementations must reject a second record with the same code using
/// [`StoreError::DuplicateCode`].
#[async_trait::async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Number of stored submissions.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Ordinal to try for the next code. Defaults to `count() + 1`.
    async fn next_ordinal(&self) -> Result<u64, StoreError> {
        Ok(self.count().await? + 1)
    }

    /// Insert `record` under `code`; the store confirms the write by returning it.
    async fn insert(
        &self,
        record: &NewSubmission,
        code: &SubmissionCode,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, StoreError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Submission>, StoreError>;

    /// Cheap liveness check used by the readiness endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
