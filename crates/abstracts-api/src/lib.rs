//! Abstracts API Library
//!
//! HTTP surface of the abstract submission portal: handlers, extractors,
//! form sessions and application setup.

mod api_doc;
pub mod constants;
mod handlers;
mod utils;

pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::FormRegistry;
pub use state::AppState;
