//! Long-lived API services: form sessions and periodic housekeeping.

pub mod form_registry;
pub mod maintenance;

pub use form_registry::{FormLimits, FormRegistry};
pub use maintenance::start_maintenance;
