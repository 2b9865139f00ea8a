use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        admin::{AdminUserDetailDto, AdminUserListEntryDto, AnalyticsDto, DashboardDto},
        api::{ErrorDto, MessageDto},
        quiz::{CreateQuizDto, QuizDetailDto, QuizSummaryDto, UpdateQuizDto},
        user::{UpdateRoleDto, UserDto},
    },
    server::{
        controller::util::get_user::get_admin_from_session,
        error::Error,
        model::app::AppState,
        query::{QueryConfig, QueryState},
        service::{admin::AdminService, query::QueryService, quiz::QuizService},
    },
};

pub static ADMIN_TAG: &str = "admin";

/// Get platform totals and the most recent submissions
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let dashboard = AdminService::new(&state.db, &state.query_cache)
        .dashboard()
        .await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// Get the score distribution, daily submissions of the last week and per quiz performance
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Submission analytics", body = AnalyticsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let analytics = AdminService::new(&state.db, &state.query_cache)
        .analytics(Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(analytics)))
}

/// List every user, newest account first
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "All users", body = Vec<AdminUserListEntryDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let users = AdminService::new(&state.db, &state.query_cache)
        .list_users()
        .await?;

    Ok((StatusCode::OK, Json(users)))
}

/// Get a user with their statistics and submission history
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User detail", body = AdminUserDetailDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_detail(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let detail = AdminService::new(&state.db, &state.query_cache)
        .user_detail(user_id)
        .await?;

    Ok((StatusCode::OK, Json(detail)))
}

/// Change the role of a user
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Unknown role", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let user = AdminService::new(&state.db, &state.query_cache)
        .update_role(user_id, &payload.role)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Create a quiz with its questions and possible answers
#[utoipa::path(
    post,
    path = "/api/admin/quizzes",
    tag = ADMIN_TAG,
    request_body = CreateQuizDto,
    responses(
        (status = 201, description = "Created quiz", body = QuizDetailDto),
        (status = 400, description = "Missing or invalid fields", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_quiz(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateQuizDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = get_admin_from_session(&state, &session).await?;

    let quiz = QuizService::new(&state.db, &state.query_cache)
        .create(admin.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Update quiz metadata
#[utoipa::path(
    put,
    path = "/api/admin/quizzes/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Quiz ID")),
    request_body = UpdateQuizDto,
    responses(
        (status = 200, description = "Updated quiz", body = QuizSummaryDto),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Quiz not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_quiz(
    State(state): State<AppState>,
    session: Session,
    Path(quiz_id): Path<i32>,
    Json(payload): Json<UpdateQuizDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let quiz = QuizService::new(&state.db, &state.query_cache)
        .update(quiz_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(quiz)))
}

/// Delete a quiz together with its questions, answers and submissions
#[utoipa::path(
    delete,
    path = "/api/admin/quizzes/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Quiz deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Quiz not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_quiz(
    State(state): State<AppState>,
    session: Session,
    Path(quiz_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let admin = get_admin_from_session(&state, &session).await?;

    QuizService::new(&state.db, &state.query_cache)
        .delete(quiz_id)
        .await?;

    tracing::info!(quiz_id = %quiz_id, admin_id = %admin.id, "Deleted quiz");

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Quiz deleted".to_string(),
        }),
    ))
}

/// Run a composed query through the shared query cache
///
/// Database failures are reported in the `error` field of the returned state, next to the
/// last successfully fetched data.
#[utoipa::path(
    post,
    path = "/api/admin/query",
    tag = ADMIN_TAG,
    request_body = QueryConfig,
    responses(
        (status = 200, description = "Cached query state", body = QueryState),
        (status = 400, description = "Unknown table or column, or invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn run_query(
    State(state): State<AppState>,
    session: Session,
    Json(config): Json<QueryConfig>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let result = QueryService::new(&state.db, &state.query_cache)
        .query(&config)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
