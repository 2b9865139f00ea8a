//! HTTP controller endpoints for the QuizMaster REST API.
//!
//! Axum handlers for the public quiz flow, authentication, the user profile and the admin
//! console. Handlers resolve the session user, call into [`crate::server::service`] and
//! map results to JSON responses. Every handler is annotated for the utoipa OpenAPI
//! document served next to the Swagger UI.

pub mod admin;
pub mod auth;
pub mod quiz;
pub mod user;
pub mod util;
