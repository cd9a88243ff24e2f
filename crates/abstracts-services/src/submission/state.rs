use abstracts_core::{FieldErrors, SubmissionCode};
use serde::Serialize;
use utoipa::ToSchema;

/// Why an attempt ended in [`SubmissionState::Failed`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    Validation {
        /// First message per offending field
        #[schema(value_type = Object)]
        fields: FieldErrors,
    },
    Auth {
        message: String,
    },
    Upload,
    Persistence,
    Cancelled,
}

/// Observable state of a submission workflow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    AwaitingAuth,
    Uploading,
    AssigningCode,
    Persisting,
    Succeeded {
        code: SubmissionCode,
    },
    Failed {
        failure: FailureKind,
    },
}

impl SubmissionState {
    /// True while an attempt is running.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SubmissionState::Validating
                | SubmissionState::Uploading
                | SubmissionState::AssigningCode
                | SubmissionState::Persisting
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::AwaitingAuth => "awaiting_auth",
            SubmissionState::Uploading => "uploading",
            SubmissionState::AssigningCode => "assigning_code",
            SubmissionState::Persisting => "persisting",
            SubmissionState::Succeeded { .. } => "succeeded",
            SubmissionState::Failed { .. } => "failed",
        }
    }

    pub fn code(&self) -> Option<&SubmissionCode> {
        match self {
            SubmissionState::Succeeded { code } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abstracts_core::{CodeFormat, Field};
    use serde_json::json;

    #[test]
    fn test_busy_states() {
        assert!(SubmissionState::Uploading.is_busy());
        assert!(SubmissionState::Persisting.is_busy());
        assert!(!SubmissionState::Idle.is_busy());
        assert!(!SubmissionState::AwaitingAuth.is_busy());
        assert!(!SubmissionState::Failed {
            failure: FailureKind::Upload
        }
        .is_busy());
    }

    #[test]
    fn test_serialization_shape() {
        let code = CodeFormat::default().format(7);
        let succeeded = SubmissionState::Succeeded { code: code.clone() };
        assert_eq!(
            serde_json::to_value(&succeeded).unwrap(),
            json!({"state": "succeeded", "code": "ENG0007"})
        );
        assert_eq!(succeeded.code(), Some(&code));

        let mut fields = FieldErrors::new();
        fields.push(Field::Cpf, "CPF deve ter 11 dígitos");
        let failed = SubmissionState::Failed {
            failure: FailureKind::Validation { fields },
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({
                "state": "failed",
                "failure": {"kind": "validation", "fields": {"cpf": "CPF deve ter 11 dígitos"}}
            })
        );
        assert_eq!(failed.name(), "failed");
    }
}
