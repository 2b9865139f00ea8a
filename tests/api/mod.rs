//! End-to-end tests driving the router with an in-memory database and session store.

mod admin;
mod auth;
mod quiz;
mod user;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use quizmaster::server::{model::app::AppState, router::routes};
use quizmaster_test_utils::TestContext;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// Router under test with a cookie jar holding a single session cookie
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    pub fn new(test: &TestContext) -> Self {
        let session = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);
        let router = routes()
            .with_state(test.to_app_state::<AppState>())
            .layer(session);

        Self {
            router,
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let cookie = set_cookie.to_str().unwrap();
            self.cookie = cookie.split(';').next().map(str::to_string);
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    /// Logs in as an existing fixture user
    pub async fn login(&mut self, email: &str) {
        let (status, _) = self
            .post(
                "/api/auth/login",
                serde_json::json!({
                    "email": email,
                    "password": quizmaster_test_utils::prelude::TEST_PASSWORD,
                }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
    }
}
