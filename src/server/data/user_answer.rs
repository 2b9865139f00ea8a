use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder,
};

/// One answered question of a submission
pub struct NewUserAnswer {
    pub question_id: i32,
    pub selected_answer_id: Option<i32>,
    pub is_correct: bool,
}

pub struct UserAnswerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserAnswerRepository<'a, C> {
    /// Creates a new instance of [`UserAnswerRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records every answer of a submission
    pub async fn create_many(
        &self,
        submission_id: i32,
        answers: Vec<NewUserAnswer>,
    ) -> Result<(), DbErr> {
        if answers.is_empty() {
            return Ok(());
        }

        let answers = answers.into_iter().map(|answer| entity::user_answers::ActiveModel {
            submission_id: ActiveValue::Set(submission_id),
            question_id: ActiveValue::Set(answer.question_id),
            selected_answer_id: ActiveValue::Set(answer.selected_answer_id),
            is_correct: ActiveValue::Set(answer.is_correct),
            ..Default::default()
        });

        entity::prelude::UserAnswers::insert_many(answers)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn get_by_submission_id(
        &self,
        submission_id: i32,
    ) -> Result<Vec<entity::user_answers::Model>, DbErr> {
        entity::prelude::UserAnswers::find()
            .filter(entity::user_answers::Column::SubmissionId.eq(submission_id))
            .order_by_asc(entity::user_answers::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn delete_by_submission_ids(
        &self,
        submission_ids: Vec<i32>,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserAnswers::delete_many()
            .filter(entity::user_answers::Column::SubmissionId.is_in(submission_ids))
            .exec(self.db)
            .await
    }
}
