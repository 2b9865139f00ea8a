use axum::http::StatusCode;
use quizmaster_test_utils::prelude::*;

use super::TestApp;

/// Expect 401 for the profile without a session
#[tokio::test]
async fn profile_requires_login() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let mut app = TestApp::new(&test);

    let (status, _) = app.get("/api/user/profile").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the history newest first with the quiz title embedded
#[tokio::test]
async fn submissions_embed_quiz() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let user = test.user().insert_user(TEST_USER_EMAIL).await?;
    let other = test.user().insert_user("other@example.com").await?;
    let quiz = test.quiz().insert_quiz("Capitals", true).await?;
    let at = |day| {
        chrono::NaiveDate::from_ymd_opt(2026, 10, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap()
    };
    test.quiz()
        .insert_submission_at(quiz.id, Some(user.id), 4, 10, at(1))
        .await?;
    let latest = test
        .quiz()
        .insert_submission_at(quiz.id, Some(user.id), 9, 10, at(2))
        .await?;
    test.quiz()
        .insert_submission_at(quiz.id, Some(other.id), 1, 10, at(3))
        .await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_USER_EMAIL).await;

    let (status, body) = app.get("/api/user/submissions").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].is_null());
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], latest.id);
    assert_eq!(rows[0]["quizzes"]["title"], "Capitals");

    Ok(())
}

/// Expect a new submission to show up in a history that was just served from the cache
#[tokio::test]
async fn submission_refreshes_history() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_user(TEST_USER_EMAIL).await?;
    let quiz = test.quiz().insert_quiz("Capitals", true).await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_USER_EMAIL).await;

    let (_, before) = app.get("/api/user/submissions").await;
    assert_eq!(before["data"], serde_json::json!([]));

    let (status, _) = app
        .post(
            "/api/quizzes/submit",
            serde_json::json!({"quiz_id": quiz.id, "score": 2, "total_possible": 4}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, after) = app.get("/api/user/submissions").await;
    assert_eq!(after["data"].as_array().unwrap().len(), 1);

    Ok(())
}
