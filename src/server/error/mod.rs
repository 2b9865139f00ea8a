//! Error types for the QuizMaster server.
//!
//! This module provides the error handling system with specialized error types for each
//! domain (authentication, configuration, quizzes, users, validation, query composition).
//! All errors implement `IntoResponse` for Axum HTTP responses and use `thiserror` for
//! ergonomic error definitions.

pub mod auth;
pub mod config;
pub mod query;
pub mod quiz;
pub mod user;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, query::QueryError, quiz::QuizError,
        user::UserError, validation::ValidationError,
    },
};

/// Main error type for the QuizMaster server.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// type. `#[from]` enables conversion via the `?` operator, and the `IntoResponse`
/// implementation maps each error to its HTTP response.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (session, credentials, roles)
/// - Validation errors (missing or malformed request fields)
/// - Not found errors (quizzes, users)
/// - Query composition errors (unknown tables/columns, bad filters)
/// - External library errors (database, sessions)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, credentials, role checks).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request validation error.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Quiz lookup error.
    #[error(transparent)]
    QuizError(#[from] QuizError),
    /// User lookup error.
    #[error(transparent)]
    UserError(#[from] UserError),
    /// Invalid query configuration.
    #[error(transparent)]
    QueryError(#[from] QueryError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in QuizMaster's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Failed to bind or serve the HTTP listener.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures, duplicate registration, invalid query configuration
/// - 401 Unauthorized - Missing session or invalid credentials
/// - 403 Forbidden - Admin route accessed without the admin role
/// - 404 Not Found - Missing quizzes or users
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::QuizError(err) => err.into_response(),
            Self::UserError(err) => err.into_response(),
            Self::QueryError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON `{error}` response with the provided status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
