//! Data access layer repositories.
//!
//! One repository per table, generic over [`sea_orm::ConnectionTrait`] so the same code
//! runs against a connection or inside a transaction.

pub mod question;
pub mod quiz;
pub mod submission;
pub mod user;
pub mod user_answer;
