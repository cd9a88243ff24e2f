//! Fixed values of the submission portal.

/// Maximum abstract size accepted by validation (10 MiB).
pub const MAX_ABSTRACT_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// The only media type accepted for abstracts.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Bucket (key prefix) abstracts are uploaded under.
pub const ABSTRACT_BUCKET: &str = "resumos";

pub const DEFAULT_CODE_PREFIX: &str = "ENG";

/// Minimum digit count of a submission code ordinal; wider ordinals are kept whole.
pub const CODE_ORDINAL_WIDTH: usize = 4;

pub const DEFAULT_CODE_ASSIGNMENT_ATTEMPTS: u32 = 5;

pub const CPF_LENGTH: usize = 11;
pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const IBGE_BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v1";

pub const DEFAULT_AREAS_VERSION: &str = "2025.1";

/// Topical areas offered at design time.
pub const DEFAULT_SUBMISSION_AREAS: [&str; 11] = [
    "Processos de Fabricação",
    "Corrosão",
    "Metalurgia Física",
    "Mecânica da Fratura e Análise de Falha",
    "END e Inspeção",
    "Tribologia / Engenharia de Superfícies",
    "Metalurgia Extrativa / Siderurgia",
    "Seleção de Materiais e Técnicas de Caracterização",
    "Indústria 4.0",
    "Educação em Engenharia",
    "Outras",
];

pub const EVENT_NAME: &str = "XII Congresso Brasileiro de Engenharia da Rede PDMat";
pub const EVENT_MODALITY: &str = "Presencial";
pub const EVENT_SHORT_NAME: &str = "engBRASIL25";
