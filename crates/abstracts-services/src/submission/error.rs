use abstracts_core::error::SIGN_IN_REQUIRED;
use abstracts_core::{AppError, FieldErrors, SubmissionCode};

/// Outcome of a submit or resume that did not produce a code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// No active session; the validated form is kept for resume.
    #[error("{}", SIGN_IN_REQUIRED)]
    AuthRequired,

    #[error("{0}")]
    Auth(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("A submission attempt is already in progress")]
    InProgress,

    #[error("No submission is waiting for sign-in")]
    NotAwaitingAuth,

    #[error("Already submitted as {0}; acknowledge before submitting again")]
    AlreadySubmitted(SubmissionCode),

    #[error("Submission cancelled")]
    Cancelled,
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(fields) => AppError::Validation(fields),
            SubmissionError::AuthRequired => AppError::AuthRequired(SIGN_IN_REQUIRED.to_string()),
            SubmissionError::Auth(msg) => AppError::Auth(msg),
            SubmissionError::Upload(msg) => AppError::UploadFailed(msg),
            SubmissionError::Persistence(msg) => AppError::Persistence(msg),
            SubmissionError::InProgress => AppError::SubmissionInProgress,
            e @ (SubmissionError::NotAwaitingAuth
            | SubmissionError::AlreadySubmitted(_)
            | SubmissionError::Cancelled) => AppError::Conflict(e.to_string()),
        }
    }
}
