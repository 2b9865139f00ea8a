//! QuizMaster backend.
//!
//! JSON REST API for a quiz-taking platform: a public quiz flow, user profiles and an
//! admin console for managing quizzes, users and analytics.

pub mod model;
pub mod server;
