//! Utility functions and helpers for server operations.
//!
//! Password hashing, the score arithmetic shared by every route that displays percentages
//! and the date window used by the admin analytics.

pub mod password;
pub mod score;
pub mod time;
