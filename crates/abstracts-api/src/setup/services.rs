//! Service initialization and application state setup

use crate::constants::MAINTENANCE_INTERVAL_SECS;
use crate::services::start_maintenance;
use crate::state::AppState;
use abstracts_core::validation::SubmissionSchema;
use abstracts_core::{CodeFormat, Config};
use abstracts_db::{PgSubmissionRepository, SessionRepository, UserRepository};
use abstracts_services::{AuthGatekeeper, IbgeClient, PasswordIdentityProvider, WorkflowContext};
use abstracts_storage::Storage;
use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Wire repositories and services into the application state and start the
/// background maintenance task.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let call_timeout = Duration::from_secs(config.external_call_timeout_secs());

    let identity = PasswordIdentityProvider::new(
        UserRepository::new(pool.clone()),
        SessionRepository::new(pool.clone()),
        chrono::Duration::hours(config.session_ttl_hours()),
    );
    let gatekeeper = AuthGatekeeper::new(Arc::new(identity.clone()));

    let geo = IbgeClient::new(config.geo_api_base_url(), call_timeout)
        .context("Failed to build IBGE client")?;
    tracing::info!(base_url = geo.base_url(), "Geographic lookup configured");

    let workflow = WorkflowContext {
        storage,
        store: Arc::new(PgSubmissionRepository::new(pool)),
        gatekeeper,
        schema: Arc::new(SubmissionSchema::new(
            config.area_catalog().clone(),
            config.max_abstract_size_bytes(),
        )),
        code_format: CodeFormat::new(config.code_prefix()),
        bucket: config.abstract_bucket().to_string(),
        max_code_attempts: config.code_assignment_max_attempts(),
        call_timeout,
    };
    tracing::info!(
        code_prefix = config.code_prefix(),
        max_code_attempts = config.code_assignment_max_attempts(),
        areas_version = config.area_catalog().version(),
        "Submission workflow configured"
    );

    let state = Arc::new(AppState::new(config.clone(), workflow, Arc::new(geo)));

    start_maintenance(
        state.forms.clone(),
        Some(identity),
        Duration::from_secs(MAINTENANCE_INTERVAL_SECS),
    );

    Ok(state)
}
