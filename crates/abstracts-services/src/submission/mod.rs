//! The submission workflow: validation, sign-in gate, upload, code
//! assignment and durable insert.

mod code_assigner;
mod error;
mod receipt;
mod state;
mod workflow;

pub use code_assigner::{AssignPhase, CodeAssigner};
pub use error::SubmissionError;
pub use receipt::SubmissionReceipt;
pub use state::{FailureKind, SubmissionState};
pub use workflow::{SubmissionWorkflow, WorkflowContext};
