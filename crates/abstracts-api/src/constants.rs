//! API constants

/// Versioned prefix of every API route
pub const API_PREFIX: &str = "/api/v1";

/// Where the OpenAPI document is served
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// How often idle form sessions and expired sign-in sessions are swept
pub const MAINTENANCE_INTERVAL_SECS: u64 = 60;
