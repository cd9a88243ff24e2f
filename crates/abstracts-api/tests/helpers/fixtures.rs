//! Multipart bodies for the submission form.

use axum_test::multipart::{MultipartForm, Part};

/// Minimal PDF, padded to `size` bytes.
pub fn create_test_pdf(size: usize) -> Vec<u8> {
    let mut data = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n".to_vec();
    data.resize(size.max(data.len()), b' ');
    data
}

fn text_fields(cpf: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("nome", "Maria da Silva")
        .add_text("cpf", cpf)
        .add_text("estado", "SP")
        .add_text("cidade", "Campinas")
        .add_text("instituicao", "UNICAMP")
        .add_text("email", "maria@example.com")
        .add_text("areas", "Corrosão")
        .add_text("areas", "Metalurgia Física")
}

/// A form that passes validation.
pub fn valid_submission(cpf: &str) -> MultipartForm {
    text_fields(cpf).add_part(
        "resumo",
        Part::bytes(create_test_pdf(2048))
            .file_name("resumo.pdf")
            .mime_type("application/pdf"),
    )
}

/// A form whose CPF, email and abstract are rejected.
pub fn invalid_submission() -> MultipartForm {
    MultipartForm::new()
        .add_text("nome", "Maria da Silva")
        .add_text("cpf", "123")
        .add_text("estado", "SP")
        .add_text("cidade", "Campinas")
        .add_text("instituicao", "UNICAMP")
        .add_text("email", "not-an-email")
        .add_text("areas", "Corrosão")
        .add_part(
            "resumo",
            Part::bytes(b"plain text".to_vec())
                .file_name("resumo.txt")
                .mime_type("text/plain"),
        )
}
