use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Durable record of one abstract submission (table `submissoes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Submission {
    pub id: Uuid,
    pub nome: String,
    pub cpf: String,
    /// Region sigla, e.g. "MG"
    pub estado: String,
    pub cidade: String,
    pub instituicao: String,
    pub email: String,
    pub areas: Vec<String>,
    pub pdf_url: String,
    #[schema(example = "ENG0042")]
    pub codigo_submissao: String,
    pub data_envio: DateTime<Utc>,
}

/// Everything the store needs to insert a submission except the code and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub nome: String,
    pub cpf: String,
    pub estado: String,
    pub cidade: String,
    pub instituicao: String,
    pub email: String,
    pub areas: Vec<String>,
    pub pdf_url: String,
}

/// Public status of a submission, free of personal data.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionStatusResponse {
    #[schema(example = "ENG0042")]
    pub codigo_submissao: String,
    #[schema(example = "received")]
    pub status: String,
    pub areas: Vec<String>,
    pub estado: String,
    pub cidade: String,
    pub instituicao: String,
    pub data_envio: DateTime<Utc>,
}

impl From<Submission> for SubmissionStatusResponse {
    fn from(submission: Submission) -> Self {
        Self {
            codigo_submissao: submission.codigo_submissao,
            status: "received".to_string(),
            areas: submission.areas,
            estado: submission.estado,
            cidade: submission.cidade,
            instituicao: submission.instituicao,
            data_envio: submission.data_envio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_omits_personal_data() {
        let submission = Submission {
            id: Uuid::new_v4(),
            nome: "Maria Silva".to_string(),
            cpf: "12345678900".to_string(),
            estado: "MG".to_string(),
            cidade: "Belo Horizonte".to_string(),
            instituicao: "UFMG".to_string(),
            email: "maria@example.com".to_string(),
            areas: vec!["Corrosão".to_string()],
            pdf_url: "http://localhost/resumos/12345678900_1.pdf".to_string(),
            codigo_submissao: "ENG0001".to_string(),
            data_envio: Utc::now(),
        };

        let json = serde_json::to_value(SubmissionStatusResponse::from(submission)).unwrap();
        assert_eq!(json["codigo_submissao"], "ENG0001");
        assert_eq!(json["status"], "received");
        assert!(json.get("cpf").is_none());
        assert!(json.get("email").is_none());
        assert!(json.get("nome").is_none());
    }
}
