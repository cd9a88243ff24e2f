//! Application state shared by every handler.

use std::sync::Arc;

use abstracts_core::{AreaCatalog, CodeFormat, Config};
use abstracts_db::SubmissionStore;
use abstracts_services::{AuthGatekeeper, GeoLookup, WorkflowContext};
use abstracts_storage::Storage;

use crate::services::{FormLimits, FormRegistry};

pub struct AppState {
    pub config: Config,
    /// Collaborators every submission workflow is built from
    pub workflow: WorkflowContext,
    pub geo: Arc<dyn GeoLookup>,
    pub forms: FormRegistry,
}

impl AppState {
    pub fn new(config: Config, workflow: WorkflowContext, geo: Arc<dyn GeoLookup>) -> Self {
        let forms = FormRegistry::new(workflow.clone(), FormLimits::from_config(&config));
        Self {
            config,
            workflow,
            geo,
            forms,
        }
    }

    pub fn gatekeeper(&self) -> &AuthGatekeeper {
        &self.workflow.gatekeeper
    }

    pub fn store(&self) -> &Arc<dyn SubmissionStore> {
        &self.workflow.store
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.workflow.storage
    }

    pub fn catalog(&self) -> &AreaCatalog {
        self.workflow.schema.catalog()
    }

    pub fn code_format(&self) -> &CodeFormat {
        &self.workflow.code_format
    }
}
