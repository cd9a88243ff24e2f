use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use abstracts_core::models::{Submission, SubmissionStatusResponse};
use abstracts_core::AppError;
use abstracts_services::SubmissionReceipt;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReceiptQuery {
    /// `json` (default) or `text`
    #[serde(default)]
    format: Option<String>,
}

async fn find_submission(state: &AppState, code: &str) -> Result<Submission, HttpAppError> {
    if state.code_format().parse(code).is_none() {
        return Err(HttpAppError(AppError::InvalidInput(format!(
            "Código de submissão inválido: {}",
            code
        ))));
    }

    state
        .store()
        .find_by_code(code)
        .await?
        .ok_or_else(|| {
            HttpAppError(AppError::NotFound(
                "Submissão não encontrada".to_string(),
            ))
        })
}

#[utoipa::path(
    get,
    path = "/api/v1/submissions/{code}",
    tag = "submissions",
    params(("code" = String, Path, description = "Submission code, e.g. ENG0042")),
    responses(
        (status = 200, description = "Status of the submission, without personal data", body = SubmissionStatusResponse),
        (status = 400, description = "Malformed code", body = ErrorResponse),
        (status = 404, description = "No submission with this code", body = ErrorResponse)
    )
)]
pub async fn get_submission_status(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<SubmissionStatusResponse>, HttpAppError> {
    let submission = find_submission(&state, &code).await?;
    Ok(Json(SubmissionStatusResponse::from(submission)))
}

#[utoipa::path(
    get,
    path = "/api/v1/submissions/{code}/receipt",
    tag = "submissions",
    params(
        ("code" = String, Path, description = "Submission code, e.g. ENG0042"),
        ReceiptQuery
    ),
    responses(
        (status = 200, description = "Proof of submission", body = SubmissionReceipt),
        (status = 400, description = "Malformed code", body = ErrorResponse),
        (status = 404, description = "No submission with this code", body = ErrorResponse)
    )
)]
pub async fn get_submission_receipt(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(query): Query<ReceiptQuery>,
) -> Result<Response, HttpAppError> {
    let submission = find_submission(&state, &code).await?;
    let (code, _) = state
        .code_format()
        .parse(&submission.codigo_submissao)
        .ok_or_else(|| {
            HttpAppError(AppError::Internal(format!(
                "Stored code {} does not match the configured format",
                submission.codigo_submissao
            )))
        })?;

    let receipt = SubmissionReceipt::new(code, Utc::now());

    match query.format.as_deref() {
        None | Some("json") => Ok(Json(receipt).into_response()),
        Some("text") => {
            let file_name = receipt.text_file_name();
            Ok((
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name),
                    ),
                ],
                receipt.render_text(),
            )
                .into_response())
        }
        Some(other) => Err(HttpAppError(AppError::InvalidInput(format!(
            "Unsupported receipt format '{}'; use 'json' or 'text'",
            other
        )))),
    }
}
