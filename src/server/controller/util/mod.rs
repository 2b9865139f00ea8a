//! Utility functions for controller request handling.
//!
//! Session user lookups shared by every protected endpoint.

pub mod get_user;
