use abstracts_core::constants::{EVENT_MODALITY, EVENT_NAME, EVENT_SHORT_NAME};
use abstracts_core::SubmissionCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

const RECEIPT_TITLE: &str = "Comprovante de Submissão";
const CODE_LABEL: &str = "Seu código de submissão:";
const KEEP_CODE_NOTICE: &str = "Guarde este código para acompanhar o status da sua submissão.";

/// Proof of submission handed to the author after a successful attempt.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubmissionReceipt {
    #[schema(example = "Comprovante de Submissão")]
    pub title: String,
    pub event: String,
    #[schema(example = "Presencial")]
    pub modality: String,
    pub code: SubmissionCode,
    pub instructions: Vec<String>,
    pub generated_at: DateTime<Utc>,
    #[schema(example = "comprovante-engBRASIL25-ENG0042.pdf")]
    pub file_name: String,
}

impl SubmissionReceipt {
    pub fn new(code: SubmissionCode, generated_at: DateTime<Utc>) -> Self {
        let instructions = vec![
            KEEP_CODE_NOTICE.to_string(),
            format!(
                "Todo contato com a organização do {} deve indicar o código do resumo mencionado acima.",
                EVENT_SHORT_NAME
            ),
        ];
        let file_name = format!("{}.pdf", file_stem(&code));

        Self {
            title: RECEIPT_TITLE.to_string(),
            event: EVENT_NAME.to_string(),
            modality: EVENT_MODALITY.to_string(),
            code,
            instructions,
            generated_at,
            file_name,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Download name of the [`render_text`](Self::render_text) rendering.
    pub fn text_file_name(&self) -> String {
        format!("{}.txt", file_stem(&self.code))
    }

    /// Plain-text rendering, one block per receipt section.
    pub fn render_text(&self) -> String {
        let mut lines = vec![
            self.title.clone(),
            String::new(),
            self.event.clone(),
            self.modality.clone(),
            String::new(),
            CODE_LABEL.to_string(),
            self.code.to_string(),
            String::new(),
        ];
        lines.extend(self.instructions.iter().cloned());
        lines.push(String::new());
        lines.push(format!(
            "Documento gerado em: {}",
            self.generated_at.format("%d/%m/%Y, %H:%M:%S UTC")
        ));
        lines.join("\n")
    }
}

fn file_stem(code: &SubmissionCode) -> String {
    format!("comprovante-{}-{}", EVENT_SHORT_NAME, code)
}
