//! Session token extraction for handlers.

pub mod models;

pub use models::{AuthSession, BearerToken, SessionResponse};
