//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main quizmaster crate so fixtures and tests read the same.

pub type UserModel = entity::users::Model;

pub type QuizModel = entity::quizzes::Model;

pub type QuestionModel = entity::questions::Model;

pub type PossibleAnswerModel = entity::question_possible_answers::Model;

pub type SubmissionModel = entity::submissions::Model;

pub type UserAnswerModel = entity::user_answers::Model;
