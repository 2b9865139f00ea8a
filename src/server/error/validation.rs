use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid score: {0}")]
    InvalidScore(String),
    #[error("Invalid role {0:?}, expected \"user\" or \"admin\"")]
    InvalidRole(String),
    #[error("Invalid difficulty {0:?}, expected \"easy\", \"medium\" or \"hard\"")]
    InvalidDifficulty(String),
    #[error("Invalid question type {0:?}, expected \"multiple_choice\" or \"true_false\"")]
    InvalidQuestionType(String),
    #[error("Invalid points {0}, points must not be negative")]
    InvalidPoints(i32),
    #[error("Question {question_id} does not belong to quiz {quiz_id}")]
    ForeignQuestion { quiz_id: i32, question_id: i32 },
    #[error("Answer {answer_id} is not a possible answer of question {question_id}")]
    ForeignAnswer { question_id: i32, answer_id: i32 },
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("Validation error: {}", self);

        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
