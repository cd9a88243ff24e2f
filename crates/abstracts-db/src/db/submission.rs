use abstracts_core::models::{NewSubmission, Submission};
use abstracts_core::SubmissionCode;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};

use super::store::{StoreError, SubmissionStore};

const SUBMISSION_COLUMNS: &str = "id, nome, cpf, estado, cidade, instituicao, email, areas, \
     pdf_url, codigo_submissao, data_envio";

/// PostgreSQL-backed submission store (table `submissoes`).
///
/// Ordinals come from the `submission_code_seq` sequence, so concurrent
/// attempts never draw the same candidate; the unique constraint on
/// `codigo_submissao` remains the final arbiter.
#[derive(Clone)]
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SubmissionStore for PgSubmissionRepository {
    #[tracing::instrument(skip(self), fields(db.table = "submissoes", db.operation = "count"))]
    async fn count(&self) -> Result<u64, StoreError> {
        let count = sqlx::query_scalar::<Postgres, i64>("SELECT COUNT(*) FROM submissoes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    #[tracing::instrument(skip(self), fields(db.table = "submission_code_seq", db.operation = "nextval"))]
    async fn next_ordinal(&self) -> Result<u64, StoreError> {
        let ordinal = sqlx::query_scalar::<Postgres, i64>("SELECT nextval('submission_code_seq')")
            .fetch_one(&self.pool)
            .await?;

        Ok(ordinal.max(1) as u64)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "submissoes", db.operation = "insert", code = %code))]
    async fn insert(
        &self,
        record: &NewSubmission,
        code: &SubmissionCode,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, StoreError> {
        let query = format!(
            r#"
            INSERT INTO submissoes (
                nome, cpf, estado, cidade, instituicao, email, areas,
                pdf_url, codigo_submissao, data_envio
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        );

        let submission = sqlx::query_as::<Postgres, Submission>(&query)
            .bind(&record.nome)
            .bind(&record.cpf)
            .bind(&record.estado)
            .bind(&record.cidade)
            .bind(&record.instituicao)
            .bind(&record.email)
            .bind(&record.areas)
            .bind(&record.pdf_url)
            .bind(code.as_str())
            .bind(submitted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let err = StoreError::from(e);
                if !err.is_duplicate_code() {
                    tracing::error!(error = %err, code = %code, "Failed to insert submission");
                }
                err
            })?;

        Ok(submission)
    }

    #[tracing::instrument(skip(self), fields(db.table = "submissoes", db.operation = "select"))]
    async fn find_by_code(&self, code: &str) -> Result<Option<Submission>, StoreError> {
        let query = format!(
            "SELECT {} FROM submissoes WHERE codigo_submissao = $1",
            SUBMISSION_COLUMNS
        );

        let submission = sqlx::query_as::<Postgres, Submission>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(submission)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
