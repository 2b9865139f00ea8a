//! Service layer for business logic.
//!
//! Services hold the rules of the application: credential checks, scoring and profile
//! statistics, the quiz deletion order and the admin aggregations. They coordinate the
//! repositories of [`crate::server::data`] and invalidate the shared query cache after
//! every write.

pub mod admin;
pub mod auth;
pub mod query;
pub mod quiz;
pub mod submission;
pub mod user;
