//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its utoipa path annotation.
//! The collected OpenAPI document is served at `/api/docs/openapi.json` with Swagger UI
//! at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/quizzes` - List published quizzes
/// - `GET /api/quizzes/{id}` - Get a published quiz with its questions
/// - `POST /api/quizzes/submit` - Submit a quiz attempt
/// - `POST /api/auth/register` - Create an account and log in
/// - `POST /api/auth/login` - Log in with email and password
/// - `POST /api/auth/logout` - Log out current user
/// - `GET /api/auth/user` - Get current user information
/// - `GET /api/user/profile` - Get the current user's profile
/// - `GET /api/user/submissions` - Get the current user's submission history
/// - `GET /api/admin/dashboard`, `GET /api/admin/analytics` - Admin statistics
/// - `GET /api/admin/users`, `GET|PATCH /api/admin/users/{id}` - User management
/// - `POST /api/admin/quizzes`, `PUT|DELETE /api/admin/quizzes/{id}` - Quiz management
/// - `POST /api/admin/query` - Run a composed query through the query cache
///
/// # Returns
/// An Axum `Router<AppState>` expecting a session layer and the application state.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState::new(db, QueryCache::default())).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "QuizMaster", description = "QuizMaster API"), tags(
        (name = controller::quiz::QUIZ_TAG, description = "Public quiz routes"),
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::user::USER_TAG, description = "Current user routes"),
        (name = controller::admin::ADMIN_TAG, description = "Admin console routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::quiz::list_quizzes))
        .routes(routes!(controller::quiz::get_quiz))
        .routes(routes!(controller::quiz::submit_quiz))
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::user::get_profile))
        .routes(routes!(controller::user::get_submissions))
        .routes(routes!(controller::admin::get_dashboard))
        .routes(routes!(controller::admin::get_analytics))
        .routes(routes!(controller::admin::list_users))
        .routes(routes!(
            controller::admin::get_user_detail,
            controller::admin::update_user_role
        ))
        .routes(routes!(controller::admin::create_quiz))
        .routes(routes!(
            controller::admin::update_quiz,
            controller::admin::delete_quiz
        ))
        .routes(routes!(controller::admin::run_query))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
