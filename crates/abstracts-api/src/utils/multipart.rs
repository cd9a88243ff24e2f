//! Multipart decoding of the submission form

use abstracts_core::validation::{AbstractFile, SubmissionForm};
use abstracts_core::AppError;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

const FILE_FIELD: &str = "resumo";
const AREAS_FIELD: &str = "areas";
const AREA_SEPARATOR: char = ';';

/// Read a submission form from `multipart`.
///
/// Text fields map one-to-one onto [`SubmissionForm`]; `areas` may repeat or
/// carry several `;`-separated areas. Unknown fields are ignored. Missing
/// fields stay empty so that validation reports them per field.
pub async fn read_submission_form(mut multipart: Multipart) -> Result<SubmissionForm, AppError> {
    let mut form = SubmissionForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if name == FILE_FIELD {
            if form.resumo.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple 'resumo' files are not allowed".to_string(),
                ));
            }
            let file_name = field.file_name().unwrap_or("resumo").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await.map_err(multipart_error)?;

            form.resumo = Some(AbstractFile::new(file_name, content_type, data));
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "nome" => form.nome = value,
            "cpf" => form.cpf = value,
            "estado" => form.estado = value,
            "cidade" => form.cidade = value,
            "instituicao" => form.instituicao = value,
            "email" => form.email = value,
            AREAS_FIELD => form.areas.extend(split_areas(&value)),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// Areas named in one `areas` value, trimmed, empties dropped.
pub fn split_areas(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(AREA_SEPARATOR)
        .map(str::trim)
        .filter(|area| !area.is_empty())
        .map(str::to_string)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Request body too large: {}", err.body_text()))
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header::CONTENT_TYPE, Request};

    const BOUNDARY: &str = "XBOUNDARYX";

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        )
    }

    async fn multipart(body: String) -> Multipart {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[test]
    fn test_split_areas() {
        let areas: Vec<String> = split_areas(" Corrosão ; Metalurgia Física;;").collect();
        assert_eq!(areas, ["Corrosão", "Metalurgia Física"]);
        assert_eq!(split_areas("").count(), 0);
    }

    #[tokio::test]
    async fn test_reads_fields_and_file() {
        let mut body = String::new();
        body.push_str(&text_part("nome", "Maria da Silva"));
        body.push_str(&text_part("cpf", "123.456.789-00"));
        body.push_str(&text_part("estado", "SP"));
        body.push_str(&text_part("cidade", "Campinas"));
        body.push_str(&text_part("instituicao", "UNICAMP"));
        body.push_str(&text_part("email", "maria@example.com"));
        body.push_str(&text_part("areas", "Corrosão"));
        body.push_str(&text_part("areas", "Metalurgia Física;Biomateriais"));
        body.push_str(&text_part("extra", "ignored"));
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"resumo\"; filename=\"resumo.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n%PDF-1.4\r\n--{}--\r\n",
            BOUNDARY, BOUNDARY
        ));

        let form = read_submission_form(multipart(body).await).await.unwrap();
        assert_eq!(form.nome, "Maria da Silva");
        assert_eq!(form.cpf, "123.456.789-00");
        assert_eq!(form.cidade, "Campinas");
        assert_eq!(form.areas, ["Corrosão", "Metalurgia Física", "Biomateriais"]);

        let file = form.resumo.expect("file part");
        assert_eq!(file.file_name, "resumo.pdf");
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(&file.data[..], b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_missing_fields_stay_empty() {
        let body = format!("{}--{}--\r\n", text_part("nome", "Maria"), BOUNDARY);

        let form = read_submission_form(multipart(body).await).await.unwrap();
        assert_eq!(form.nome, "Maria");
        assert!(form.cpf.is_empty());
        assert!(form.areas.is_empty());
        assert!(form.resumo.is_none());
    }
}
