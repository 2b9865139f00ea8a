use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizSummaryDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: String,
    /// Time limit in seconds
    pub time_limit: Option<i32>,
    pub is_published: bool,
    pub question_count: u64,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizDetailDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: String,
    pub time_limit: Option<i32>,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    /// Questions ordered by position
    pub questions: Vec<QuestionDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuestionDto {
    pub id: i32,
    pub question_text: String,
    pub question_type: String,
    pub points: i32,
    pub position: i32,
    pub answers: Vec<PossibleAnswerDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PossibleAnswerDto {
    pub id: i32,
    pub answer_text: String,
    pub is_correct: bool,
}

/// Query parameters accepted by the quiz listing
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuizListParams {
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

/// A completed quiz attempt sent by the quiz page
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubmitQuizDto {
    pub quiz_id: Option<i32>,
    pub score: Option<i32>,
    pub total_possible: Option<i32>,
    /// Seconds spent on the quiz
    pub time_spent: Option<i32>,
    pub answers: Option<Vec<SubmittedAnswerDto>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubmittedAnswerDto {
    pub question_id: i32,
    pub selected_answer_id: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubmissionDto {
    pub id: i32,
    pub quiz_id: i32,
    pub user_id: Option<i32>,
    pub score: i32,
    pub total_possible: i32,
    pub percentage: f64,
    pub time_spent: Option<i32>,
    pub completed_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateQuizDto {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub time_limit: Option<i32>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub questions: Vec<CreateQuestionDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateQuestionDto {
    pub question_text: String,
    pub question_type: Option<String>,
    pub points: Option<i32>,
    #[serde(default)]
    pub answers: Vec<CreateAnswerDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateAnswerDto {
    pub answer_text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Partial quiz update, absent fields are left unchanged
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateQuizDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub time_limit: Option<i32>,
    pub is_published: Option<bool>,
}
