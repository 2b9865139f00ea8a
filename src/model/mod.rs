//! Data transfer objects shared by the HTTP API.
//!
//! Every request and response body of the REST API is defined here and derives
//! `utoipa::ToSchema` so it appears in the generated OpenAPI document.

pub mod admin;
pub mod api;
pub mod auth;
pub mod quiz;
pub mod user;
