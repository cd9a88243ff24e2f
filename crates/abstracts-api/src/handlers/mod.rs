pub mod areas;
pub mod auth;
pub mod forms;
pub mod geo;
pub mod submissions;
