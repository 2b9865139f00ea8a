pub use super::question_possible_answers::Entity as QuestionPossibleAnswers;
pub use super::questions::Entity as Questions;
pub use super::quizzes::Entity as Quizzes;
pub use super::submissions::Entity as Submissions;
pub use super::user_answers::Entity as UserAnswers;
pub use super::users::Entity as Users;
