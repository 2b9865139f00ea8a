use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::ProfileDto},
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        query::QueryState,
        service::user::{profile_dto, UserService},
    },
};

pub static USER_TAG: &str = "user";

/// Get the profile and statistics of the logged in user
#[utoipa::path(
    get,
    path = "/api/user/profile",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Profile of the current user", body = ProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok((StatusCode::OK, Json(profile_dto(&user))))
}

/// Get the submission history of the logged in user, newest first
///
/// Served through the query cache, rows embed the quiz `title` and `category` under `quizzes`.
#[utoipa::path(
    get,
    path = "/api/user/submissions",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Query state holding the submissions", body = QueryState),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_submissions(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let history = UserService::new(&state.db, &state.query_cache)
        .get_submission_history(user.id)
        .await?;

    Ok((StatusCode::OK, Json(history)))
}
