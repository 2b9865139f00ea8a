use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::user::{ProfileDto, UserDto};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DashboardDto {
    pub total_users: u64,
    pub total_quizzes: u64,
    pub published_quizzes: u64,
    pub total_submissions: u64,
    /// Mean percentage across every submission
    pub average_score: f64,
    pub recent_submissions: Vec<RecentSubmissionDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecentSubmissionDto {
    pub id: i32,
    pub quiz_title: String,
    /// `None` for anonymous attempts
    pub username: Option<String>,
    pub score: i32,
    pub total_possible: i32,
    pub percentage: f64,
    pub completed_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnalyticsDto {
    pub score_distribution: Vec<ScoreBucketDto>,
    /// One entry per day of the last 7 days, oldest first
    pub daily_submissions: Vec<DailySubmissionsDto>,
    /// Most attempted quizzes first
    pub quiz_performance: Vec<QuizPerformanceDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScoreBucketDto {
    pub range: String,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DailySubmissionsDto {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizPerformanceDto {
    pub quiz_id: i32,
    pub title: String,
    pub attempts: u64,
    pub average_score: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminUserDetailDto {
    pub profile: ProfileDto,
    pub stats: UserStatsDto,
    /// Newest first
    pub submissions: Vec<UserSubmissionDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserStatsDto {
    pub quizzes_taken: u64,
    pub average_percentage: f64,
    pub best_percentage: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserSubmissionDto {
    pub id: i32,
    pub quiz_id: i32,
    pub quiz_title: String,
    pub score: i32,
    pub total_possible: i32,
    pub percentage: f64,
    pub time_spent: Option<i32>,
    pub completed_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminUserListEntryDto {
    pub user: UserDto,
    pub quizzes_taken: i32,
    pub average_score: f64,
    pub created_at: NaiveDateTime,
}
