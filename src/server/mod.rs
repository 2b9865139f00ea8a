//! Server application core modules.
//!
//! This module contains all server-side functionality for the QuizMaster application:
//! HTTP routing, session authentication, database access through sea-orm repositories,
//! the business services and the cached query layer shared by the read endpoints.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod query;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
