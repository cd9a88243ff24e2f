//! Abstracts Database Library
//!
//! PostgreSQL repositories for submissions, accounts and sessions, plus the
//! [`SubmissionStore`] trait the submission workflow persists through.

pub mod db;

pub use db::*;
