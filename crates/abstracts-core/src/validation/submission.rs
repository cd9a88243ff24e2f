use bytes::Bytes;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::constants::{
    CPF_LENGTH, MAX_ABSTRACT_SIZE_BYTES, MIN_NAME_LENGTH, PDF_CONTENT_TYPE,
};
use crate::models::{AreaCatalog, NewSubmission};

use super::cpf::normalize_cpf;
use super::field::{Field, FieldErrors};
use super::is_valid_email;

/// An uploaded abstract as received from the client.
#[derive(Clone)]
pub struct AbstractFile {
    pub file_name: String,
    /// Declared media type, as sent by the client
    pub content_type: String,
    pub data: Bytes,
}

impl AbstractFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl Debug for AbstractFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AbstractFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Candidate form exactly as the user filled it in.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub nome: String,
    pub cpf: String,
    pub estado: String,
    pub cidade: String,
    pub instituicao: String,
    pub email: String,
    pub areas: Vec<String>,
    pub resumo: Option<AbstractFile>,
}

/// A form that satisfied every rule of [`SubmissionSchema`].
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub nome: String,
    /// Eleven digits, formatting stripped
    pub cpf: String,
    pub estado: String,
    pub cidade: String,
    pub instituicao: String,
    pub email: String,
    pub areas: Vec<String>,
    pub resumo: AbstractFile,
}

impl ValidatedSubmission {
    /// Record to persist once the abstract is reachable at `pdf_url`.
    pub fn to_record(&self, pdf_url: String) -> NewSubmission {
        NewSubmission {
            nome: self.nome.clone(),
            cpf: self.cpf.clone(),
            estado: self.estado.clone(),
            cidade: self.cidade.clone(),
            instituicao: self.instituicao.clone(),
            email: self.email.clone(),
            areas: self.areas.clone(),
            pdf_url,
        }
    }
}

/// Declarative rules for the submission form.
#[derive(Debug, Clone)]
pub struct SubmissionSchema {
    catalog: AreaCatalog,
    max_file_size: usize,
}

impl SubmissionSchema {
    pub fn new(catalog: AreaCatalog, max_file_size: usize) -> Self {
        Self {
            catalog,
            max_file_size,
        }
    }

    pub fn catalog(&self) -> &AreaCatalog {
        &self.catalog
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Check every field and collect all violations.
    pub fn validate(&self, form: &SubmissionForm) -> Result<ValidatedSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();

        let nome = form.nome.trim();
        if nome.chars().count() < MIN_NAME_LENGTH {
            errors.push(Field::Nome, "Nome completo é obrigatório");
        }

        let cpf = normalize_cpf(&form.cpf);
        if cpf.chars().count() != CPF_LENGTH {
            errors.push(Field::Cpf, "CPF deve ter 11 dígitos");
        }
        if !cpf.chars().all(|c| c.is_ascii_digit()) {
            errors.push(Field::Cpf, "CPF deve conter apenas números");
        }

        let estado = form.estado.trim();
        if estado.is_empty() {
            errors.push(Field::Estado, "Estado é obrigatório");
        }
        let cidade = form.cidade.trim();
        if cidade.is_empty() {
            errors.push(Field::Cidade, "Cidade é obrigatória");
        }
        let instituicao = form.instituicao.trim();
        if instituicao.is_empty() {
            errors.push(Field::Instituicao, "Instituição ou Empresa é obrigatória");
        }

        let email = form.email.trim();
        if !is_valid_email(email) {
            errors.push(Field::Email, "E-mail inválido");
        }

        let areas = self.check_areas(&form.areas, &mut errors);

        let resumo = match &form.resumo {
            None => {
                errors.push(Field::Resumo, "Arquivo de resumo é obrigatório");
                None
            }
            Some(file) => {
                if file.size() > self.max_file_size {
                    errors.push(Field::Resumo, self.size_message());
                }
                if file.content_type.trim() != PDF_CONTENT_TYPE {
                    errors.push(Field::Resumo, "O arquivo deve ser um PDF");
                }
                Some(file.clone())
            }
        };

        let resumo = match resumo {
            Some(resumo) if errors.is_empty() => resumo,
            _ => return Err(errors),
        };

        Ok(ValidatedSubmission {
            nome: nome.to_string(),
            cpf,
            estado: estado.to_string(),
            cidade: cidade.to_string(),
            instituicao: instituicao.to_string(),
            email: email.to_string(),
            areas,
            resumo,
        })
    }

    fn check_areas(&self, selected: &[String], errors: &mut FieldErrors) -> Vec<String> {
        let mut areas: Vec<String> = Vec::with_capacity(selected.len());
        for area in selected {
            let area = area.trim();
            if area.is_empty() || areas.iter().any(|a| a == area) {
                continue;
            }
            if !self.catalog.contains(area) {
                errors.push(Field::Areas, format!("Área inválida: {}", area));
            }
            areas.push(area.to_string());
        }
        if areas.is_empty() {
            errors.push(Field::Areas, "Selecione pelo menos uma área");
        }
        areas
    }

    fn size_message(&self) -> String {
        let mb = self.max_file_size / (1024 * 1024);
        format!("O arquivo deve ter no máximo {}MB", mb)
    }
}

impl Default for SubmissionSchema {
    fn default() -> Self {
        Self::new(AreaCatalog::default(), MAX_ABSTRACT_SIZE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(size: usize) -> AbstractFile {
        AbstractFile::new("resumo.pdf", PDF_CONTENT_TYPE, Bytes::from(vec![b'%'; size]))
    }

    fn valid_form() -> SubmissionForm {
        SubmissionForm {
            nome: "Maria Silva".to_string(),
            cpf: "123.456.789-00".to_string(),
            estado: "MG".to_string(),
            cidade: "Belo Horizonte".to_string(),
            instituicao: "UFMG".to_string(),
            email: "maria@ufmg.br".to_string(),
            areas: vec!["Corrosão".to_string()],
            resumo: Some(pdf(1024)),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let validated = SubmissionSchema::default().validate(&valid_form()).unwrap();
        assert_eq!(validated.cpf, "12345678900");
        assert_eq!(validated.areas, vec!["Corrosão"]);
        assert_eq!(validated.resumo.size(), 1024);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = SubmissionSchema::default()
            .validate(&SubmissionForm::default())
            .unwrap_err();

        assert_eq!(errors.first(Field::Nome), Some("Nome completo é obrigatório"));
        assert_eq!(errors.first(Field::Cpf), Some("CPF deve ter 11 dígitos"));
        assert_eq!(errors.first(Field::Estado), Some("Estado é obrigatório"));
        assert_eq!(errors.first(Field::Cidade), Some("Cidade é obrigatória"));
        assert_eq!(
            errors.first(Field::Instituicao),
            Some("Instituição ou Empresa é obrigatória")
        );
        assert_eq!(errors.first(Field::Email), Some("E-mail inválido"));
        assert_eq!(errors.first(Field::Areas), Some("Selecione pelo menos uma área"));
        assert_eq!(errors.first(Field::Resumo), Some("Arquivo de resumo é obrigatório"));
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn test_name_is_trimmed_before_length_check() {
        let form = SubmissionForm {
            nome: "  Al  ".to_string(),
            ..valid_form()
        };
        let errors = SubmissionSchema::default().validate(&form).unwrap_err();
        assert!(errors.contains(Field::Nome));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_cpf_with_letters_always_fails() {
        let schema = SubmissionSchema::default();
        for cpf in ["1234567890a", "abcdefghijk", "123.456.789-0x"] {
            let form = SubmissionForm {
                cpf: cpf.to_string(),
                ..valid_form()
            };
            let errors = schema.validate(&form).unwrap_err();
            assert!(errors.contains(Field::Cpf), "{} should be rejected", cpf);
        }
    }

    #[test]
    fn test_cpf_digit_rule_message() {
        let form = SubmissionForm {
            cpf: "1234567890a".to_string(),
            ..valid_form()
        };
        let errors = SubmissionSchema::default().validate(&form).unwrap_err();
        assert_eq!(errors.first(Field::Cpf), Some("CPF deve conter apenas números"));
    }

    #[test]
    fn test_cpf_wrong_length() {
        let schema = SubmissionSchema::default();
        for cpf in ["1234567890", "123456789001"] {
            let form = SubmissionForm {
                cpf: cpf.to_string(),
                ..valid_form()
            };
            let errors = schema.validate(&form).unwrap_err();
            assert_eq!(errors.first(Field::Cpf), Some("CPF deve ter 11 dígitos"));
        }
    }

    #[test]
    fn test_oversized_file_has_size_message() {
        let form = SubmissionForm {
            resumo: Some(pdf(11 * 1024 * 1024)),
            ..valid_form()
        };
        let errors = SubmissionSchema::default().validate(&form).unwrap_err();
        assert_eq!(
            errors.first(Field::Resumo),
            Some("O arquivo deve ter no máximo 10MB")
        );
        assert_eq!(errors.messages(Field::Resumo).len(), 1);
    }

    #[test]
    fn test_file_at_limit_passes() {
        let form = SubmissionForm {
            resumo: Some(pdf(MAX_ABSTRACT_SIZE_BYTES)),
            ..valid_form()
        };
        assert!(SubmissionSchema::default().validate(&form).is_ok());
    }

    #[test]
    fn test_non_pdf_has_type_message() {
        let form = SubmissionForm {
            resumo: Some(AbstractFile::new(
                "resumo.docx",
                "application/msword",
                Bytes::from_static(b"doc"),
            )),
            ..valid_form()
        };
        let errors = SubmissionSchema::default().validate(&form).unwrap_err();
        assert_eq!(errors.first(Field::Resumo), Some("O arquivo deve ser um PDF"));
    }

    #[test]
    fn test_size_and_type_checked_independently() {
        let form = SubmissionForm {
            resumo: Some(AbstractFile::new(
                "big.png",
                "image/png",
                Bytes::from(vec![0u8; 11 * 1024 * 1024]),
            )),
            ..valid_form()
        };
        let errors = SubmissionSchema::default().validate(&form).unwrap_err();
        let messages = errors.messages(Field::Resumo);
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m == "O arquivo deve ser um PDF"));
    }

    #[test]
    fn test_unknown_area_rejected() {
        let form = SubmissionForm {
            areas: vec!["Astrologia".to_string()],
            ..valid_form()
        };
        let errors = SubmissionSchema::default().validate(&form).unwrap_err();
        assert_eq!(errors.first(Field::Areas), Some("Área inválida: Astrologia"));
    }

    #[test]
    fn test_duplicate_areas_collapse() {
        let form = SubmissionForm {
            areas: vec![
                "Corrosão".to_string(),
                "Outras".to_string(),
                "Corrosão".to_string(),
            ],
            ..valid_form()
        };
        let validated = SubmissionSchema::default().validate(&form).unwrap();
        assert_eq!(validated.areas, vec!["Corrosão", "Outras"]);
    }

    #[test]
    fn test_catalog_comes_from_configuration() {
        let catalog = AreaCatalog::new("2026.1", vec!["Biomateriais".to_string()]);
        let schema = SubmissionSchema::new(catalog, MAX_ABSTRACT_SIZE_BYTES);

        assert!(schema.validate(&valid_form()).is_err());
        let form = SubmissionForm {
            areas: vec!["Biomateriais".to_string()],
            ..valid_form()
        };
        assert!(schema.validate(&form).is_ok());
    }

    #[test]
    fn test_to_record_carries_url() {
        let validated = SubmissionSchema::default().validate(&valid_form()).unwrap();
        let record = validated.to_record("http://files/resumos/x.pdf".to_string());
        assert_eq!(record.pdf_url, "http://files/resumos/x.pdf");
        assert_eq!(record.cpf, "12345678900");
        assert_eq!(record.estado, "MG");
    }
}
