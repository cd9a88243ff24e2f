//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::SessionResponse;
use crate::error;
use crate::handlers;
use abstracts_core::models;
use abstracts_core::validation::Credentials;
use abstracts_services::{FailureKind, SubmissionReceipt, SubmissionState};

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Abstracts API",
        version = "0.1.0",
        description = "Abstract submission portal: author accounts, form sessions that validate, upload and register an abstract under a unique submission code, status inquiry and receipts. All endpoints are versioned under /api/v1/."
    ),
    modifiers(&BearerAuth),
    paths(
        // Auth
        handlers::auth::sign_up,
        handlers::auth::sign_in,
        handlers::auth::sign_out,
        handlers::auth::current_session,
        // Catalogs
        handlers::geo::list_regions,
        handlers::geo::list_municipalities,
        handlers::areas::list_areas,
        // Forms
        handlers::forms::create_form,
        handlers::forms::get_form,
        handlers::forms::submit_form,
        handlers::forms::resume_form,
        handlers::forms::acknowledge_form,
        handlers::forms::delete_form,
        // Submissions
        handlers::submissions::get_submission_status,
        handlers::submissions::get_submission_receipt,
    ),
    components(
        schemas(
            models::Account,
            models::Region,
            models::Municipality,
            models::AreaCatalog,
            models::Submission,
            models::SubmissionStatusResponse,
            Credentials,
            SessionResponse,
            SubmissionState,
            FailureKind,
            SubmissionReceipt,
            handlers::forms::FormResponse,
            handlers::forms::SubmissionResult,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "auth", description = "Sign up, sign in and session inspection"),
        (name = "geo", description = "Brazilian states and municipalities"),
        (name = "catalog", description = "Topical areas"),
        (name = "forms", description = "Form sessions and the submission workflow"),
        (name = "submissions", description = "Status inquiry and receipts by submission code")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_versioned_paths() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/v1/forms/{id}/submit"));
        assert!(spec.paths.paths.contains_key("/api/v1/submissions/{code}/receipt"));
        assert!(spec.paths.paths.contains_key("/api/v1/auth/signup"));
    }

    #[test]
    fn test_spec_declares_bearer_token() {
        let spec = get_openapi_spec();
        let components = spec.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_token"));
    }
}
