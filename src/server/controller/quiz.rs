use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        quiz::{QuizDetailDto, QuizListParams, QuizSummaryDto, SubmissionDto, SubmitQuizDto},
    },
    server::{
        controller::util::get_user::get_optional_user_from_session,
        error::Error,
        model::app::AppState,
        service::{quiz::QuizService, submission::SubmissionService},
    },
};

pub static QUIZ_TAG: &str = "quiz";

/// List published quizzes, newest first
#[utoipa::path(
    get,
    path = "/api/quizzes",
    tag = QUIZ_TAG,
    params(QuizListParams),
    responses(
        (status = 200, description = "Published quizzes", body = Vec<QuizSummaryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_quizzes(
    State(state): State<AppState>,
    Query(params): Query<QuizListParams>,
) -> Result<impl IntoResponse, Error> {
    let quizzes = QuizService::new(&state.db, &state.query_cache)
        .list(&params, true)
        .await?;

    Ok((StatusCode::OK, Json(quizzes)))
}

/// Get a published quiz with its questions and possible answers
#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    tag = QUIZ_TAG,
    params(("id" = i32, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Quiz with questions", body = QuizDetailDto),
        (status = 404, description = "Quiz not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let quiz = QuizService::new(&state.db, &state.query_cache)
        .get(quiz_id, true)
        .await?;

    Ok((StatusCode::OK, Json(quiz)))
}

/// Submit a completed quiz attempt
///
/// Attempts are attributed to the logged in user when there is one and recorded
/// anonymously otherwise.
#[utoipa::path(
    post,
    path = "/api/quizzes/submit",
    tag = QUIZ_TAG,
    request_body = SubmitQuizDto,
    responses(
        (status = 201, description = "Submission recorded", body = SubmissionDto),
        (status = 400, description = "Missing or invalid fields", body = ErrorDto),
        (status = 404, description = "Quiz not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SubmitQuizDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_optional_user_from_session(&state, &session).await?;

    let submission = SubmissionService::new(&state.db, &state.query_cache)
        .submit(user.map(|user| user.id), payload)
        .await?;

    Ok((StatusCode::CREATED, Json(submission)))
}
