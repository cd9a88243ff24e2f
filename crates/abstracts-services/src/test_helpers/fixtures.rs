//! Test fixtures for forms, records and workflow wiring

use super::{MockIdentityProvider, MockStorage, MockSubmissionStore};
use crate::auth::AuthGatekeeper;
use crate::submission::WorkflowContext;
use abstracts_core::constants::{
    ABSTRACT_BUCKET, DEFAULT_CODE_ASSIGNMENT_ATTEMPTS, MAX_ABSTRACT_SIZE_BYTES, PDF_CONTENT_TYPE,
};
use abstracts_core::models::NewSubmission;
use abstracts_core::validation::{AbstractFile, SubmissionForm, SubmissionSchema};
use abstracts_core::{AreaCatalog, CodeFormat};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

/// A PDF-typed abstract of exactly `size` bytes.
pub fn pdf_file(size: usize) -> AbstractFile {
    let mut data = b"%PDF-1.7\n".to_vec();
    data.resize(size.max(data.len()), b'0');
    data.truncate(size);
    AbstractFile::new("resumo.pdf", PDF_CONTENT_TYPE, Bytes::from(data))
}

/// A form that passes every rule.
pub fn valid_form() -> SubmissionForm {
    SubmissionForm {
        nome: "Maria da Silva".to_string(),
        cpf: "123.456.789-00".to_string(),
        estado: "SP".to_string(),
        cidade: "Campinas".to_string(),
        instituicao: "UNICAMP".to_string(),
        email: "maria@example.com".to_string(),
        areas: vec!["Corrosão".to_string(), "Metalurgia Física".to_string()],
        resumo: Some(pdf_file(1024)),
    }
}

/// A form breaking the CPF, email and areas rules.
pub fn invalid_form() -> SubmissionForm {
    SubmissionForm {
        cpf: "123".to_string(),
        email: "not-an-email".to_string(),
        areas: Vec::new(),
        ..valid_form()
    }
}

pub fn new_submission(cpf: &str) -> NewSubmission {
    NewSubmission {
        nome: "Maria da Silva".to_string(),
        cpf: cpf.to_string(),
        estado: "SP".to_string(),
        cidade: "Campinas".to_string(),
        instituicao: "UNICAMP".to_string(),
        email: "maria@example.com".to_string(),
        areas: vec!["Corrosão".to_string()],
        pdf_url: format!("memory://{}/{}_1.pdf", ABSTRACT_BUCKET, cpf),
    }
}

/// Workflow context wired to the given fakes with default settings.
pub fn workflow_context(
    storage: &MockStorage,
    store: &MockSubmissionStore,
    provider: &MockIdentityProvider,
) -> WorkflowContext {
    WorkflowContext {
        storage: Arc::new(storage.clone()),
        store: Arc::new(store.clone()),
        gatekeeper: AuthGatekeeper::new(Arc::new(provider.clone())),
        schema: Arc::new(SubmissionSchema::new(
            AreaCatalog::default(),
            MAX_ABSTRACT_SIZE_BYTES,
        )),
        code_format: CodeFormat::default(),
        bucket: ABSTRACT_BUCKET.to_string(),
        max_code_attempts: DEFAULT_CODE_ASSIGNMENT_ATTEMPTS,
        call_timeout: Duration::from_secs(5),
    }
}
