//! Database model type aliases.
//!
//! Short names for the `entity` crate models used throughout the server.

/// Registered account, including profile statistics.
///
/// `average_score` is `total_points / quizzes_taken`, 0 until the first submission.
pub type UserModel = entity::users::Model;

pub type QuizModel = entity::quizzes::Model;

/// Question of a quiz, ordered within the quiz by `position`.
pub type QuestionModel = entity::questions::Model;

pub type PossibleAnswerModel = entity::question_possible_answers::Model;

/// Recorded quiz attempt, `user_id` is `None` for anonymous attempts.
pub type SubmissionModel = entity::submissions::Model;

pub type UserAnswerModel = entity::user_answers::Model;
