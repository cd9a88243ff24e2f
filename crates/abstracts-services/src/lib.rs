//! Abstracts Services Layer
//!
//! Business services of the submission portal: the geographic lookup client,
//! the authentication gatekeeper and the submission workflow with its code
//! assigner. Every collaborator is injected as a trait object so the API and
//! the tests can swap implementations freely.

pub mod auth;
pub mod geo;
pub mod submission;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use auth::{
    AuthGatekeeper, IdentityError, IdentityProvider, PasswordIdentityProvider, SessionSubscription,
};
pub use geo::{GeoLookup, IbgeClient, LocationSelection, SelectionError};
pub use submission::{
    CodeAssigner, FailureKind, SubmissionError, SubmissionReceipt, SubmissionState,
    SubmissionWorkflow, WorkflowContext,
};
