use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email already registered")]
    EmailTaken,
    #[error("User ID {0:?} attempted to access an admin route without the admin role")]
    Forbidden(i32),
    #[error("Failed to hash or verify password: {0}")]
    PasswordHash(String),
}

impl AuthError {
    fn not_authenticated() -> Response {
        error_response(StatusCode::UNAUTHORIZED, "Not authenticated")
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", self);

                Self::not_authenticated()
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                Self::not_authenticated()
            }
            Self::InvalidCredentials => {
                tracing::debug!("{}", self);

                error_response(StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            Self::EmailTaken => {
                tracing::debug!("{}", self);

                error_response(StatusCode::BAD_REQUEST, "Email already registered")
            }
            Self::Forbidden(user_id) => {
                tracing::warn!(user_id = %user_id, "{}", self);

                error_response(StatusCode::FORBIDDEN, "Forbidden")
            }
            Self::PasswordHash(_) => InternalServerError(self).into_response(),
        }
    }
}
