use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Fields of a new submission
pub struct NewSubmission {
    pub user_id: Option<i32>,
    pub quiz_id: i32,
    pub score: i32,
    pub total_possible: i32,
    pub time_spent: Option<i32>,
}

pub struct SubmissionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubmissionRepository<'a, C> {
    /// Creates a new instance of [`SubmissionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a submission completed now
    pub async fn create(
        &self,
        submission: NewSubmission,
    ) -> Result<entity::submissions::Model, DbErr> {
        let submission = entity::submissions::ActiveModel {
            user_id: ActiveValue::Set(submission.user_id),
            quiz_id: ActiveValue::Set(submission.quiz_id),
            score: ActiveValue::Set(submission.score),
            total_possible: ActiveValue::Set(submission.total_possible),
            time_spent: ActiveValue::Set(submission.time_spent),
            completed_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        submission.insert(self.db).await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::submissions::Model>, DbErr> {
        entity::prelude::Submissions::find()
            .order_by_asc(entity::submissions::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Submissions::find().count(self.db).await
    }

    /// Submissions completed at or after `since`
    pub async fn get_completed_since(
        &self,
        since: NaiveDateTime,
    ) -> Result<Vec<entity::submissions::Model>, DbErr> {
        entity::prelude::Submissions::find()
            .filter(entity::submissions::Column::CompletedAt.gte(since))
            .all(self.db)
            .await
    }

    /// The `limit` most recent submissions with their quiz, newest first
    pub async fn get_recent_with_quiz(
        &self,
        limit: u64,
    ) -> Result<Vec<(entity::submissions::Model, Option<entity::quizzes::Model>)>, DbErr> {
        entity::prelude::Submissions::find()
            .find_also_related(entity::quizzes::Entity)
            .order_by_desc(entity::submissions::Column::CompletedAt)
            .order_by_desc(entity::submissions::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Submissions of a user with their quiz, newest first
    pub async fn get_by_user_id_with_quiz(
        &self,
        user_id: i32,
    ) -> Result<Vec<(entity::submissions::Model, Option<entity::quizzes::Model>)>, DbErr> {
        entity::prelude::Submissions::find()
            .filter(entity::submissions::Column::UserId.eq(user_id))
            .find_also_related(entity::quizzes::Entity)
            .order_by_desc(entity::submissions::Column::CompletedAt)
            .order_by_desc(entity::submissions::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_ids_by_quiz_id(&self, quiz_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Submissions::find()
            .select_only()
            .column(entity::submissions::Column::Id)
            .filter(entity::submissions::Column::QuizId.eq(quiz_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    pub async fn delete_by_quiz_id(&self, quiz_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Submissions::delete_many()
            .filter(entity::submissions::Column::QuizId.eq(quiz_id))
            .exec(self.db)
            .await
    }
}
