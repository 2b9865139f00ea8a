//! Test fixture modules for database record creation.
//!
//! - `user` - QuizMaster users with hashed fixture passwords
//! - `quiz` - quizzes, questions, possible answers and submissions

pub mod quiz;
pub mod user;
