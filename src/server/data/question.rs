use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Fields of a new question
pub struct NewQuestion<'a> {
    pub quiz_id: i32,
    pub question_text: &'a str,
    pub question_type: &'a str,
    pub points: i32,
    pub position: i32,
}

pub struct QuestionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QuestionRepository<'a, C> {
    /// Creates a new instance of [`QuestionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, question: NewQuestion<'_>) -> Result<entity::questions::Model, DbErr> {
        let question = entity::questions::ActiveModel {
            quiz_id: ActiveValue::Set(question.quiz_id),
            question_text: ActiveValue::Set(question.question_text.to_string()),
            question_type: ActiveValue::Set(question.question_type.to_string()),
            points: ActiveValue::Set(question.points),
            position: ActiveValue::Set(question.position),
            ..Default::default()
        };

        question.insert(self.db).await
    }

    /// Questions of a quiz ordered by position
    pub async fn get_by_quiz_id(&self, quiz_id: i32) -> Result<Vec<entity::questions::Model>, DbErr> {
        entity::prelude::Questions::find()
            .filter(entity::questions::Column::QuizId.eq(quiz_id))
            .order_by_asc(entity::questions::Column::Position)
            .order_by_asc(entity::questions::Column::Id)
            .all(self.db)
            .await
    }

    /// `quiz_id` of every question belonging to one of `quiz_ids`, one entry per question
    pub async fn get_quiz_ids(&self, quiz_ids: Vec<i32>) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Questions::find()
            .select_only()
            .column(entity::questions::Column::QuizId)
            .filter(entity::questions::Column::QuizId.is_in(quiz_ids))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    pub async fn delete_by_quiz_id(&self, quiz_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Questions::delete_many()
            .filter(entity::questions::Column::QuizId.eq(quiz_id))
            .exec(self.db)
            .await
    }
}

pub struct PossibleAnswerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PossibleAnswerRepository<'a, C> {
    /// Creates a new instance of [`PossibleAnswerRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        question_id: i32,
        answer_text: &str,
        is_correct: bool,
    ) -> Result<entity::question_possible_answers::Model, DbErr> {
        let answer = entity::question_possible_answers::ActiveModel {
            question_id: ActiveValue::Set(question_id),
            answer_text: ActiveValue::Set(answer_text.to_string()),
            is_correct: ActiveValue::Set(is_correct),
            ..Default::default()
        };

        answer.insert(self.db).await
    }

    pub async fn get_by_question_ids(
        &self,
        question_ids: Vec<i32>,
    ) -> Result<Vec<entity::question_possible_answers::Model>, DbErr> {
        entity::prelude::QuestionPossibleAnswers::find()
            .filter(entity::question_possible_answers::Column::QuestionId.is_in(question_ids))
            .order_by_asc(entity::question_possible_answers::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_many(
        &self,
        answer_ids: Vec<i32>,
    ) -> Result<Vec<entity::question_possible_answers::Model>, DbErr> {
        entity::prelude::QuestionPossibleAnswers::find()
            .filter(entity::question_possible_answers::Column::Id.is_in(answer_ids))
            .all(self.db)
            .await
    }

    /// Deletes the answers of every question of a quiz
    pub async fn delete_by_quiz_id(&self, quiz_id: i32) -> Result<DeleteResult, DbErr> {
        let question_ids = entity::prelude::Questions::find()
            .select_only()
            .column(entity::questions::Column::Id)
            .filter(entity::questions::Column::QuizId.eq(quiz_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        entity::prelude::QuestionPossibleAnswers::delete_many()
            .filter(entity::question_possible_answers::Column::QuestionId.is_in(question_ids))
            .exec(self.db)
            .await
    }
}
