//! Test helpers: build AppState and router for integration tests.
//!
//! Every collaborator is an in-memory fake from `abstracts-services`
//! (`test-helpers` feature), so no database, bucket or network is needed.
//! Run with `cargo test -p abstracts-api`.

pub mod auth;
pub mod fixtures;

use abstracts_api::constants;
use abstracts_api::setup::routes;
use abstracts_api::state::AppState;
use abstracts_core::{Config, PortalConfig};
use abstracts_services::test_helpers::{
    workflow_context, MockGeoLookup, MockIdentityProvider, MockStorage, MockSubmissionStore,
};
use axum_test::TestServer;
use std::sync::Arc;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus handles on the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MockStorage,
    pub store: MockSubmissionStore,
    pub identity: MockIdentityProvider,
    pub geo: MockGeoLookup,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(PortalConfig::default()).await
}

pub async fn setup_test_app_with(settings: PortalConfig) -> TestApp {
    let config = Config::from(settings);

    let storage = MockStorage::new();
    let store = MockSubmissionStore::new();
    let identity = MockIdentityProvider::new();
    let geo = MockGeoLookup::with_sample_data();

    let state = Arc::new(AppState::new(
        config.clone(),
        workflow_context(&storage, &store, &identity),
        Arc::new(geo.clone()),
    ));

    let app = routes::setup_routes(&config, state.clone())
        .await
        .expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to start test server");

    TestApp {
        server,
        storage,
        store,
        identity,
        geo,
        state,
    }
}
