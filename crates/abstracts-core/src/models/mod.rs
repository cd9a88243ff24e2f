pub mod area;
pub mod geo;
pub mod session;
pub mod submission;

pub use area::AreaCatalog;
pub use geo::{Municipality, Region};
pub use session::{Account, Session, SessionEvent};
pub use submission::{NewSubmission, Submission, SubmissionStatusResponse};
