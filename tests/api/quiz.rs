use axum::http::StatusCode;
use quizmaster_test_utils::prelude::*;
use serde_json::json;

use super::TestApp;

/// Expect only published quizzes to be listed
#[tokio::test]
async fn lists_published_quizzes() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let published = test.quiz().insert_quiz("Capitals", true).await?;
    test.quiz().insert_quiz("Draft", false).await?;
    let mut app = TestApp::new(&test);

    let (status, body) = app.get("/api/quizzes").await;

    assert_eq!(status, StatusCode::OK);
    let quizzes = body.as_array().unwrap();
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0]["id"], published.id);

    Ok(())
}

/// Expect 404 for a quiz that does not exist
#[tokio::test]
async fn get_missing_quiz_is_not_found() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let mut app = TestApp::new(&test);

    let (status, body) = app.get("/api/quizzes/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    Ok(())
}

/// Expect questions in position order with their possible answers
#[tokio::test]
async fn get_quiz_includes_questions() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let quiz = test.quiz().insert_quiz("Capitals", true).await?;
    test.quiz()
        .insert_question(quiz.id, 2, &[("Berlin", true), ("Munich", false)])
        .await?;
    test.quiz()
        .insert_question(quiz.id, 1, &[("Paris", true)])
        .await?;
    let mut app = TestApp::new(&test);

    let (status, body) = app.get(&format!("/api/quizzes/{}", quiz.id)).await;

    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["position"], 1);
    assert_eq!(questions[1]["answers"].as_array().unwrap().len(), 2);

    Ok(())
}

/// Expect a logged in submission of 8/10 to be recorded with its percentage and
/// reflected on the profile
#[tokio::test]
async fn submit_updates_profile() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let user = test.user().insert_user(TEST_USER_EMAIL).await?;
    let quiz = test.quiz().insert_quiz("Capitals", true).await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_USER_EMAIL).await;

    let (status, body) = app
        .post(
            "/api/quizzes/submit",
            json!({"quiz_id": quiz.id, "score": 8, "total_possible": 10, "time_spent": 95}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], user.id);
    assert_eq!(body["percentage"], 80.0);

    let (status, profile) = app.get("/api/user/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["quizzes_taken"], 1);
    assert_eq!(profile["total_points"], 8);
    assert_eq!(profile["average_score"], 8.0);

    Ok(())
}

/// Expect an anonymous submission to be stored without a user
#[tokio::test]
async fn submit_anonymously() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let quiz = test.quiz().insert_quiz("Capitals", true).await?;
    let mut app = TestApp::new(&test);

    let (status, body) = app
        .post(
            "/api/quizzes/submit",
            json!({"quiz_id": quiz.id, "score": 3, "total_possible": 4}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user_id"].is_null());
    assert_eq!(body["percentage"], 75.0);

    Ok(())
}

/// Expect 400 when the score exceeds the possible total
#[tokio::test]
async fn submit_rejects_invalid_score() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let quiz = test.quiz().insert_quiz("Capitals", true).await?;
    let mut app = TestApp::new(&test);

    let (status, _) = app
        .post(
            "/api/quizzes/submit",
            json!({"quiz_id": quiz.id, "score": 11, "total_possible": 10}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 404 and nothing recorded when submitting to an unpublished quiz
#[tokio::test]
async fn submit_rejects_unpublished_quiz() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    let quiz = test.quiz().insert_quiz("Draft", false).await?;
    let mut app = TestApp::new(&test);

    let (status, _) = app
        .post(
            "/api/quizzes/submit",
            json!({"quiz_id": quiz.id, "score": 1, "total_possible": 2}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
