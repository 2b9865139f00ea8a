use sea_orm::DatabaseConnection;

use crate::{
    model::user::{ProfileDto, UserDto},
    server::{
        data::user::UserRepository,
        error::{user::UserError, Error},
        model::db::UserModel,
        query::{Operator, QueryCache, QueryConfig, QueryState, Relation, Table},
        service::query::QueryService,
    },
};

pub(crate) fn user_dto(user: &UserModel) -> UserDto {
    UserDto {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        role: user.role.clone(),
    }
}

pub(crate) fn profile_dto(user: &UserModel) -> ProfileDto {
    ProfileDto {
        user: user_dto(user),
        quizzes_taken: user.quizzes_taken,
        total_points: user.total_points,
        average_score: user.average_score,
        created_at: user.created_at,
    }
}

/// Query backing the submission history of a user, newest first
pub fn submission_history_query(user_id: i32) -> QueryConfig {
    QueryConfig::new(Table::Submissions)
        .select("id, quiz_id, score, total_possible, time_spent, completed_at")
        .filter("user_id", Operator::Eq, user_id)
        .order_by("completed_at", false)
        .relation(Relation::new(Table::Quizzes, "quiz_id").select("title, category"))
}

/// Service for reading a user's own account data.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a QueryCache,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection, cache: &'a QueryCache) -> Self {
        Self { db, cache }
    }

    /// Returns `None` if the user does not exist
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserModel>, Error> {
        Ok(UserRepository::new(self.db).get(user_id).await?)
    }

    /// Profile with the statistics stored on the user row
    pub async fn get_profile(&self, user_id: i32) -> Result<ProfileDto, Error> {
        let user = self
            .get_user(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        Ok(profile_dto(&user))
    }

    /// Submission history through the query cache, see [`submission_history_query`]
    pub async fn get_submission_history(&self, user_id: i32) -> Result<QueryState, Error> {
        Ok(QueryService::new(self.db, self.cache)
            .query(&submission_history_query(user_id))
            .await?)
    }
}
