//! Test helpers for service and API tests
//!
//! In-memory implementations of every workflow collaborator plus form
//! fixtures. No database, blob store or network is needed.

pub mod fixtures;
pub mod mock_geo;
pub mod mock_identity;
pub mod mock_repositories;
pub mod mock_storage;

pub use fixtures::*;
pub use mock_geo::MockGeoLookup;
pub use mock_identity::MockIdentityProvider;
pub use mock_repositories::MockSubmissionStore;
pub use mock_storage::{MockStorage, UploadGate};
