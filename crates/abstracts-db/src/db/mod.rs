//! Database repositories for data access layer
//!
//! Submissions go through the [`SubmissionStore`] trait so the workflow can run
//! against PostgreSQL or an in-memory fake. Account and session repositories
//! back the password identity provider.

pub mod session;
pub mod store;
pub mod submission;
pub mod user;

pub use session::{SessionRecord, SessionRepository};
pub use store::{StoreError, SubmissionStore};
pub use submission::PgSubmissionRepository;
pub use user::{UserRecord, UserRepository};
