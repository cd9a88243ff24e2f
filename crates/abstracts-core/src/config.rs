//! Configuration module
//!
//! Settings are read from the environment (and `.env` through dotenvy). Every
//! value falls back to a default, except `DATABASE_URL`.

use std::env;

use crate::constants::{
    ABSTRACT_BUCKET, DEFAULT_AREAS_VERSION, DEFAULT_CODE_ASSIGNMENT_ATTEMPTS, DEFAULT_CODE_PREFIX,
    DEFAULT_SUBMISSION_AREAS, IBGE_BASE_URL,
};
use crate::models::AreaCatalog;
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_ABSTRACT_SIZE_MB: usize = 10;
const MAX_REQUEST_BODY_MB: usize = 25;
const EXTERNAL_CALL_TIMEOUT_SECS: u64 = 30;
const SESSION_TTL_HOURS: i64 = 168;
const FORM_SESSION_IDLE_SECS: u64 = 3600;
const PARKED_FORM_TTL_SECS: u64 = 600;
const MAX_FORM_SESSIONS: usize = 256;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// All settings of the portal.
#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub environment: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub abstract_bucket: String,
    // Submission rules
    pub max_abstract_size_bytes: usize,
    pub max_request_body_bytes: usize,
    pub code_prefix: String,
    pub code_assignment_max_attempts: u32,
    pub area_catalog: AreaCatalog,
    // External services
    pub geo_api_base_url: String,
    pub external_call_timeout_secs: u64,
    // Sessions
    pub session_ttl_hours: i64,
    pub form_session_idle_secs: u64,
    /// Lifetime of a form parked until sign-in, abstract bytes included
    pub parked_form_ttl_secs: u64,
    pub max_form_sessions: usize,
    pub http_concurrency_limit: usize,
    pub log_format: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PortalConfig>);

impl Config {
    fn inner(&self) -> &PortalConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.inner().is_production()
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PortalConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().cors_origins
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().db_timeout_seconds
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn abstract_bucket(&self) -> &str {
        &self.inner().abstract_bucket
    }

    pub fn max_abstract_size_bytes(&self) -> usize {
        self.inner().max_abstract_size_bytes
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.inner().max_request_body_bytes
    }

    pub fn code_prefix(&self) -> &str {
        &self.inner().code_prefix
    }

    pub fn code_assignment_max_attempts(&self) -> u32 {
        self.inner().code_assignment_max_attempts
    }

    pub fn area_catalog(&self) -> &AreaCatalog {
        &self.inner().area_catalog
    }

    pub fn geo_api_base_url(&self) -> &str {
        &self.inner().geo_api_base_url
    }

    pub fn external_call_timeout_secs(&self) -> u64 {
        self.inner().external_call_timeout_secs
    }

    pub fn session_ttl_hours(&self) -> i64 {
        self.inner().session_ttl_hours
    }

    pub fn form_session_idle_secs(&self) -> u64 {
        self.inner().form_session_idle_secs
    }

    pub fn parked_form_ttl_secs(&self) -> u64 {
        self.inner().parked_form_ttl_secs
    }

    pub fn max_form_sessions(&self) -> usize {
        self.inner().max_form_sessions
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.inner().log_format
    }
}

impl From<PortalConfig> for Config {
    fn from(config: PortalConfig) -> Self {
        Config(Box::new(config))
    }
}

impl PortalConfig {
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<StorageBackend>()?;

        let max_abstract_size_mb = env::var("MAX_ABSTRACT_SIZE_MB")
            .unwrap_or_else(|_| MAX_ABSTRACT_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_ABSTRACT_SIZE_MB);

        let max_request_body_mb = env::var("MAX_REQUEST_BODY_MB")
            .unwrap_or_else(|_| MAX_REQUEST_BODY_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_REQUEST_BODY_MB);

        let area_catalog = match env::var("SUBMISSION_AREAS") {
            Ok(areas) => AreaCatalog::new(
                env::var("SUBMISSION_AREAS_VERSION")
                    .unwrap_or_else(|_| DEFAULT_AREAS_VERSION.to_string()),
                areas.split(';').map(|s| s.to_string()),
            ),
            Err(_) => AreaCatalog::new(
                env::var("SUBMISSION_AREAS_VERSION")
                    .unwrap_or_else(|_| DEFAULT_AREAS_VERSION.to_string()),
                DEFAULT_SUBMISSION_AREAS.iter().map(|s| s.to_string()),
            ),
        };

        let config = PortalConfig {
            environment,
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            database_url,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            s3_region: env::var("S3_REGION").ok().filter(|s| !s.is_empty()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            aws_region: env::var("AWS_REGION").ok().filter(|s| !s.is_empty()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok().filter(|s| !s.is_empty()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            abstract_bucket: env::var("ABSTRACT_BUCKET")
                .unwrap_or_else(|_| ABSTRACT_BUCKET.to_string()),
            max_abstract_size_bytes: max_abstract_size_mb * 1024 * 1024,
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            code_prefix: env::var("SUBMISSION_CODE_PREFIX")
                .unwrap_or_else(|_| DEFAULT_CODE_PREFIX.to_string()),
            code_assignment_max_attempts: env::var("CODE_ASSIGNMENT_MAX_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_CODE_ASSIGNMENT_ATTEMPTS.to_string())
                .parse()
                .unwrap_or(DEFAULT_CODE_ASSIGNMENT_ATTEMPTS),
            area_catalog,
            geo_api_base_url: env::var("GEO_API_BASE_URL")
                .unwrap_or_else(|_| IBGE_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            external_call_timeout_secs: env::var("EXTERNAL_CALL_TIMEOUT_SECS")
                .unwrap_or_else(|_| EXTERNAL_CALL_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(EXTERNAL_CALL_TIMEOUT_SECS),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| SESSION_TTL_HOURS.to_string())
                .parse()
                .unwrap_or(SESSION_TTL_HOURS),
            form_session_idle_secs: env::var("FORM_SESSION_IDLE_SECS")
                .unwrap_or_else(|_| FORM_SESSION_IDLE_SECS.to_string())
                .parse()
                .unwrap_or(FORM_SESSION_IDLE_SECS),
            parked_form_ttl_secs: env::var("PARKED_FORM_TTL_SECS")
                .unwrap_or_else(|_| PARKED_FORM_TTL_SECS.to_string())
                .parse()
                .unwrap_or(PARKED_FORM_TTL_SECS),
            max_form_sessions: env::var("MAX_FORM_SESSIONS")
                .unwrap_or_else(|_| MAX_FORM_SESSIONS.to_string())
                .parse()
                .unwrap_or(MAX_FORM_SESSIONS),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .unwrap_or_else(|_| HTTP_CONCURRENCY_LIMIT.to_string())
                .parse()
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string())
                .to_lowercase(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        if self.abstract_bucket.trim().is_empty() || self.abstract_bucket.contains('/') {
            return Err(anyhow::anyhow!(
                "ABSTRACT_BUCKET must be a non-empty name without '/'"
            ));
        }

        if self.max_abstract_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_ABSTRACT_SIZE_MB must be greater than 0"));
        }

        // The body limit has to leave room for the text fields around the file.
        if self.max_request_body_bytes <= self.max_abstract_size_bytes {
            return Err(anyhow::anyhow!(
                "MAX_REQUEST_BODY_MB must be greater than MAX_ABSTRACT_SIZE_MB"
            ));
        }

        if self.code_prefix.is_empty() || self.code_prefix.chars().any(|c| c.is_ascii_digit()) {
            return Err(anyhow::anyhow!(
                "SUBMISSION_CODE_PREFIX must be non-empty and contain no digits"
            ));
        }

        if self.code_assignment_max_attempts == 0 {
            return Err(anyhow::anyhow!(
                "CODE_ASSIGNMENT_MAX_ATTEMPTS must be at least 1"
            ));
        }

        if self.area_catalog.is_empty() {
            return Err(anyhow::anyhow!("SUBMISSION_AREAS must list at least one area"));
        }

        if self.session_ttl_hours <= 0 {
            return Err(anyhow::anyhow!("SESSION_TTL_HOURS must be positive"));
        }

        if self.max_form_sessions == 0 {
            return Err(anyhow::anyhow!("MAX_FORM_SESSIONS must be at least 1"));
        }

        if self.parked_form_ttl_secs == 0 {
            return Err(anyhow::anyhow!("PARKED_FORM_TTL_SECS must be positive"));
        }

        if self.log_format != "text" && self.log_format != "json" {
            return Err(anyhow::anyhow!("LOG_FORMAT must be 'text' or 'json'"));
        }

        Ok(())
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            database_url: "postgres://localhost/abstracts".to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: Some("./data/uploads".to_string()),
            local_storage_base_url: Some(format!("http://localhost:{}/files", SERVER_PORT)),
            abstract_bucket: ABSTRACT_BUCKET.to_string(),
            max_abstract_size_bytes: MAX_ABSTRACT_SIZE_MB * 1024 * 1024,
            max_request_body_bytes: MAX_REQUEST_BODY_MB * 1024 * 1024,
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            code_assignment_max_attempts: DEFAULT_CODE_ASSIGNMENT_ATTEMPTS,
            area_catalog: AreaCatalog::default(),
            geo_api_base_url: IBGE_BASE_URL.to_string(),
            external_call_timeout_secs: EXTERNAL_CALL_TIMEOUT_SECS,
            session_ttl_hours: SESSION_TTL_HOURS,
            form_session_idle_secs: FORM_SESSION_IDLE_SECS,
            parked_form_ttl_secs: PARKED_FORM_TTL_SECS,
            max_form_sessions: MAX_FORM_SESSIONS,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            log_format: "text".to_string(),
        }
    }
}
