use axum::http::{Method, StatusCode};
use quizmaster_test_utils::prelude::*;
use serde_json::json;

use super::TestApp;

/// Expect 401 without a session and 403 for a regular user
#[tokio::test]
async fn admin_routes_require_admin() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_user(TEST_USER_EMAIL).await?;
    let mut app = TestApp::new(&test);

    let (status, _) = app.get("/api/admin/dashboard").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.login(TEST_USER_EMAIL).await;
    let (status, _) = app.get("/api/admin/dashboard").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect dashboard totals over every quiz and submission
#[tokio::test]
async fn dashboard_counts() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
    let quiz = test.quiz().insert_quiz("Capitals", true).await?;
    test.quiz().insert_quiz("Draft", false).await?;
    test.quiz().insert_submission(quiz.id, None, 5, 10).await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_ADMIN_EMAIL).await;

    let (status, body) = app.get("/api/admin/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_quizzes"], 2);
    assert_eq!(body["published_quizzes"], 1);
    assert_eq!(body["total_submissions"], 1);

    Ok(())
}

/// Expect a created quiz to be listed publicly once published
#[tokio::test]
async fn create_quiz_is_listed() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_ADMIN_EMAIL).await;

    let (status, created) = app
        .post(
            "/api/admin/quizzes",
            json!({
                "title": "Rivers",
                "is_published": true,
                "questions": [{
                    "question_text": "Longest river?",
                    "answers": [
                        {"answer_text": "Nile", "is_correct": true},
                        {"answer_text": "Thames"}
                    ]
                }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["questions"][0]["position"], 1);

    let (status, body) = app.get("/api/quizzes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], created["id"]);
    assert_eq!(body[0]["question_count"], 1);

    Ok(())
}

/// Expect a quiz with played submissions to be deleted along with its dependents
#[tokio::test]
async fn delete_quiz_with_submissions() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
    let quiz = test.quiz().insert_quiz("Capitals", true).await?;
    let (question, answers) = test
        .quiz()
        .insert_question(quiz.id, 1, &[("Paris", true), ("Lyon", false)])
        .await?;
    let mut app = TestApp::new(&test);

    let (status, _) = app
        .post(
            "/api/quizzes/submit",
            json!({
                "quiz_id": quiz.id,
                "score": 1,
                "total_possible": 1,
                "answers": [{"question_id": question.id, "selected_answer_id": answers[0].id}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    app.login(TEST_ADMIN_EMAIL).await;
    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/admin/quizzes/{}", quiz.id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/quizzes/{}", quiz.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 404 when deleting a quiz that does not exist
#[tokio::test]
async fn delete_missing_quiz_is_not_found() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_ADMIN_EMAIL).await;

    let (status, _) = app.send(Method::DELETE, "/api/admin/quizzes/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect role changes to be validated
#[tokio::test]
async fn update_user_role() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
    let user = test.user().insert_user(TEST_USER_EMAIL).await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_ADMIN_EMAIL).await;
    let uri = format!("/api/admin/users/{}", user.id);

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(json!({"role": "admin"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");

    let (status, _) = app
        .send(Method::PATCH, &uri, Some(json!({"role": "owner"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect a composed query to return rows in the cache state and an unknown table to be
/// rejected
#[tokio::test]
async fn run_query() -> Result<(), TestError> {
    let test = test_setup_with_quiz_tables!()?;
    test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
    test.quiz().insert_quiz("Capitals", true).await?;
    test.quiz().insert_quiz("Draft", false).await?;
    let mut app = TestApp::new(&test);
    app.login(TEST_ADMIN_EMAIL).await;

    let (status, body) = app
        .post(
            "/api/admin/query",
            json!({
                "table": "quizzes",
                "select": "id, title",
                "filter": {"column": "is_published", "operator": "is", "value": true}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loading"], false);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Capitals");

    let (status, _) = app
        .post("/api/admin/query", json!({"table": "passwords"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}
