//! Form sessions: one submission workflow per mounted form.

use crate::auth::BearerToken;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::multipart::read_submission_form;
use abstracts_core::models::Submission;
use abstracts_core::AppError;
use abstracts_services::{SubmissionReceipt, SubmissionState, SubmissionWorkflow};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct FormResponse {
    pub id: Uuid,
    pub state: SubmissionState,
    /// A validated form is parked until the author signs in and resumes
    pub awaiting_resume: bool,
}

impl FormResponse {
    fn new(id: Uuid, workflow: &SubmissionWorkflow) -> Self {
        Self {
            id,
            state: workflow.state(),
            awaiting_resume: workflow.has_pending(),
        }
    }
}

/// Outcome of a successful attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResult {
    pub form_id: Uuid,
    pub state: SubmissionState,
    #[schema(example = "ENG0042")]
    pub codigo_submissao: String,
    pub data_envio: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SubmissionReceipt>,
}

impl SubmissionResult {
    fn new(form_id: Uuid, workflow: &SubmissionWorkflow, submission: Submission) -> Self {
        let state = workflow.state();
        let receipt = match &state {
            SubmissionState::Succeeded { code } => {
                Some(SubmissionReceipt::new(code.clone(), submission.data_envio))
            }
            other => {
                tracing::warn!(
                    form_id = %form_id,
                    code = %submission.codigo_submissao,
                    state = other.name(),
                    "Form left the succeeded state before the receipt was built"
                );
                None
            }
        };

        Self {
            form_id,
            state,
            codigo_submissao: submission.codigo_submissao,
            data_envio: submission.data_envio,
            receipt,
        }
    }
}

fn find_form(state: &AppState, id: Uuid) -> Result<Arc<SubmissionWorkflow>, HttpAppError> {
    state
        .forms
        .get(id)
        .ok_or_else(|| HttpAppError(AppError::NotFound(format!("Form {} not found", id))))
}

#[utoipa::path(
    post,
    path = "/api/v1/forms",
    tag = "forms",
    responses(
        (status = 201, description = "Form session opened in the idle state", body = FormResponse),
        (status = 503, description = "Too many open form sessions", body = ErrorResponse)
    )
)]
pub async fn create_form(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<FormResponse>), HttpAppError> {
    let (id, workflow) = state.forms.create()?;
    Ok((StatusCode::CREATED, Json(FormResponse::new(id, &workflow))))
}

#[utoipa::path(
    get,
    path = "/api/v1/forms/{id}",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form session id")),
    responses(
        (status = 200, description = "Current workflow state", body = FormResponse),
        (status = 404, description = "Unknown or expired form session", body = ErrorResponse)
    )
)]
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormResponse>, HttpAppError> {
    let workflow = find_form(&state, id)?;
    Ok(Json(FormResponse::new(id, &workflow)))
}

#[utoipa::path(
    post,
    path = "/api/v1/forms/{id}/submit",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form session id")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Abstract stored and code assigned", body = SubmissionResult),
        (status = 401, description = "Valid form but no active session; sign in and resume", body = ErrorResponse),
        (status = 404, description = "Unknown or expired form session", body = ErrorResponse),
        (status = 409, description = "An attempt is already in progress", body = ErrorResponse),
        (status = 422, description = "Invalid form fields", body = ErrorResponse),
        (status = 502, description = "Upload failed", body = ErrorResponse),
        (status = 503, description = "Record could not be stored", body = ErrorResponse)
    )
)]
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    token: BearerToken,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmissionResult>), HttpAppError> {
    let workflow = find_form(&state, id)?;
    let form = read_submission_form(multipart).await?;

    let submission = workflow.submit(&form, token.as_deref()).await?;

    tracing::info!(form_id = %id, code = %submission.codigo_submissao, "Abstract submitted");
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResult::new(id, &workflow, submission)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/forms/{id}/resume",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form session id")),
    responses(
        (status = 201, description = "Parked form uploaded and stored", body = SubmissionResult),
        (status = 401, description = "Still no active session", body = ErrorResponse),
        (status = 409, description = "Nothing to resume or an attempt is in progress", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn resume_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    token: BearerToken,
) -> Result<(StatusCode, Json<SubmissionResult>), HttpAppError> {
    let workflow = find_form(&state, id)?;
    let token = token.required()?;

    let submission = workflow.resume(&token).await?;

    tracing::info!(form_id = %id, code = %submission.codigo_submissao, "Abstract submitted after sign-in");
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResult::new(id, &workflow, submission)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/forms/{id}/acknowledge",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form session id")),
    responses(
        (status = 200, description = "Back to idle; ready for another submission", body = FormResponse),
        (status = 409, description = "An attempt is in progress", body = ErrorResponse)
    )
)]
pub async fn acknowledge_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormResponse>, HttpAppError> {
    let workflow = find_form(&state, id)?;
    workflow.acknowledge()?;
    Ok(Json(FormResponse::new(id, &workflow)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/forms/{id}",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form session id")),
    responses(
        (status = 204, description = "Form session cancelled and discarded"),
        (status = 404, description = "Unknown or expired form session", body = ErrorResponse)
    )
)]
pub async fn delete_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if state.forms.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpAppError(AppError::NotFound(format!(
            "Form {} not found",
            id
        ))))
    }
}
