//! SeaORM entities for the QuizMaster database schema.

pub mod prelude;

pub mod question_possible_answers;
pub mod questions;
pub mod quizzes;
pub mod submissions;
pub mod user_answers;
pub mod users;
