use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Quiz ID {0} not found")]
    NotFound(i32),
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(quiz_id) => {
                tracing::debug!(quiz_id = %quiz_id, "{}", self);

                error_response(StatusCode::NOT_FOUND, "Quiz not found")
            }
        }
    }
}
