//! Session data models.
//!
//! Type-safe wrappers for the values the server keeps in the tower-sessions store.

pub mod user;
