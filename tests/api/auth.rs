use axum::http::StatusCode;
use entity::prelude::Users;
use quizmaster_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use super::TestApp;

/// Expect registration to log the new user in
#[tokio::test]
async fn register_logs_user_in() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let mut app = TestApp::new(&test);

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({"email": "New@Example.com", "password": "hunter22", "username": "newbie"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["role"], "user");

    let (status, body) = app.get("/api/auth/user").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "newbie");

    Ok(())
}

/// Expect 400 for an already registered email without creating a second row
#[tokio::test]
async fn register_rejects_duplicate_email() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_user(TEST_USER_EMAIL).await?;
    let mut app = TestApp::new(&test);

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({"email": TEST_USER_EMAIL, "password": "hunter22", "username": "again"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(Users::find().count(&test.db).await?, 1);

    Ok(())
}

/// Expect 400 when required registration fields are missing
#[tokio::test]
async fn register_requires_fields() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let mut app = TestApp::new(&test);

    let (status, _) = app
        .post("/api/auth/register", json!({"email": "someone@example.com"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(Users::find().count(&test.db).await?, 0);

    Ok(())
}

/// Expect 401 for a wrong password
#[tokio::test]
async fn login_rejects_wrong_password() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_user(TEST_USER_EMAIL).await?;
    let mut app = TestApp::new(&test);

    let (status, _) = app
        .post(
            "/api/auth/login",
            json!({"email": TEST_USER_EMAIL, "password": "wrong password"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the current user to be gone after logout
#[tokio::test]
async fn logout_ends_session() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_user(TEST_USER_EMAIL).await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_USER_EMAIL).await;

    let (status, body) = app.post("/api/auth/logout", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out");

    let (status, _) = app.get("/api/auth/user").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}
