//! Server application models and type definitions.
//!
//! Application state, database model type aliases and session data structures shared by
//! the controllers and services.

pub mod app;
pub mod db;
pub mod session;
