use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::quiz::UpdateQuizDto;

/// Fields of a new quiz
pub struct NewQuiz<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub difficulty: &'a str,
    pub time_limit: Option<i32>,
    pub is_published: bool,
    pub created_by: Option<i32>,
}

/// Optional listing filters, `None` matches everything
#[derive(Default)]
pub struct QuizFilter<'a> {
    pub published_only: bool,
    pub category: Option<&'a str>,
    pub difficulty: Option<&'a str>,
}

pub struct QuizRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QuizRepository<'a, C> {
    /// Creates a new instance of [`QuizRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, quiz: NewQuiz<'_>) -> Result<entity::quizzes::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let quiz = entity::quizzes::ActiveModel {
            title: ActiveValue::Set(quiz.title.to_string()),
            description: ActiveValue::Set(quiz.description.map(str::to_string)),
            category: ActiveValue::Set(quiz.category.map(str::to_string)),
            difficulty: ActiveValue::Set(quiz.difficulty.to_string()),
            time_limit: ActiveValue::Set(quiz.time_limit),
            is_published: ActiveValue::Set(quiz.is_published),
            created_by: ActiveValue::Set(quiz.created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        quiz.insert(self.db).await
    }

    pub async fn get(&self, quiz_id: i32) -> Result<Option<entity::quizzes::Model>, DbErr> {
        entity::prelude::Quizzes::find_by_id(quiz_id)
            .one(self.db)
            .await
    }

    /// Quizzes matching `filter`, newest first
    pub async fn get_many(
        &self,
        filter: QuizFilter<'_>,
    ) -> Result<Vec<entity::quizzes::Model>, DbErr> {
        let mut query = entity::prelude::Quizzes::find();

        if filter.published_only {
            query = query.filter(entity::quizzes::Column::IsPublished.eq(true));
        }
        if let Some(category) = filter.category {
            query = query.filter(entity::quizzes::Column::Category.eq(category));
        }
        if let Some(difficulty) = filter.difficulty {
            query = query.filter(entity::quizzes::Column::Difficulty.eq(difficulty));
        }

        query
            .order_by_desc(entity::quizzes::Column::CreatedAt)
            .order_by_desc(entity::quizzes::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Quizzes::find().count(self.db).await
    }

    pub async fn count_published(&self) -> Result<u64, DbErr> {
        entity::prelude::Quizzes::find()
            .filter(entity::quizzes::Column::IsPublished.eq(true))
            .count(self.db)
            .await
    }

    /// Applies every present field of `update`.
    ///
    /// Returns `None` if the quiz does not exist.
    pub async fn update(
        &self,
        quiz_id: i32,
        update: UpdateQuizDto,
    ) -> Result<Option<entity::quizzes::Model>, DbErr> {
        let Some(quiz) = self.get(quiz_id).await? else {
            return Ok(None);
        };

        let mut quiz_am = quiz.into_active_model();
        if let Some(title) = update.title {
            quiz_am.title = ActiveValue::Set(title);
        }
        if let Some(description) = update.description {
            quiz_am.description = ActiveValue::Set(Some(description));
        }
        if let Some(category) = update.category {
            quiz_am.category = ActiveValue::Set(Some(category));
        }
        if let Some(difficulty) = update.difficulty {
            quiz_am.difficulty = ActiveValue::Set(difficulty);
        }
        if let Some(time_limit) = update.time_limit {
            quiz_am.time_limit = ActiveValue::Set(Some(time_limit));
        }
        if let Some(is_published) = update.is_published {
            quiz_am.is_published = ActiveValue::Set(is_published);
        }
        quiz_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(quiz_am.update(self.db).await?))
    }

    /// Deletes a quiz row
    ///
    /// Returns OK regardless of quiz existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, quiz_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Quizzes::delete_by_id(quiz_id)
            .exec(self.db)
            .await
    }
}
