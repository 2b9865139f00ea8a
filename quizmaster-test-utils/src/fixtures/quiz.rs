use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{PossibleAnswerModel, QuestionModel, QuizModel, SubmissionModel},
    TestContext,
};

impl TestContext {
    pub fn quiz(&self) -> QuizFixtures<'_> {
        QuizFixtures { setup: self }
    }
}

pub struct QuizFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> QuizFixtures<'a> {
    /// Insert a quiz in the `general` category with `medium` difficulty
    pub async fn insert_quiz(&self, title: &str, is_published: bool) -> Result<QuizModel, TestError> {
        self.insert_quiz_in_category(title, "general", is_published)
            .await
    }

    pub async fn insert_quiz_in_category(
        &self,
        title: &str,
        category: &str,
        is_published: bool,
    ) -> Result<QuizModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Quizzes::insert(entity::quizzes::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(Some(format!("{} description", title))),
            category: ActiveValue::Set(Some(category.to_string())),
            difficulty: ActiveValue::Set("medium".to_string()),
            time_limit: ActiveValue::Set(Some(600)),
            is_published: ActiveValue::Set(is_published),
            created_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a multiple choice question with the provided `(answer_text, is_correct)` answers
    pub async fn insert_question(
        &self,
        quiz_id: i32,
        position: i32,
        answers: &[(&str, bool)],
    ) -> Result<(QuestionModel, Vec<PossibleAnswerModel>), TestError> {
        let question = entity::prelude::Questions::insert(entity::questions::ActiveModel {
            quiz_id: ActiveValue::Set(quiz_id),
            question_text: ActiveValue::Set(format!("Question {}", position)),
            question_type: ActiveValue::Set("multiple_choice".to_string()),
            points: ActiveValue::Set(1),
            position: ActiveValue::Set(position),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        let mut answer_models = Vec::with_capacity(answers.len());
        for (answer_text, is_correct) in answers {
            let answer = entity::prelude::QuestionPossibleAnswers::insert(
                entity::question_possible_answers::ActiveModel {
                    question_id: ActiveValue::Set(question.id),
                    answer_text: ActiveValue::Set(answer_text.to_string()),
                    is_correct: ActiveValue::Set(*is_correct),
                    ..Default::default()
                },
            )
            .exec_with_returning(&self.setup.db)
            .await?;

            answer_models.push(answer);
        }

        Ok((question, answer_models))
    }

    /// Insert a submission completed now
    pub async fn insert_submission(
        &self,
        quiz_id: i32,
        user_id: Option<i32>,
        score: i32,
        total_possible: i32,
    ) -> Result<SubmissionModel, TestError> {
        self.insert_submission_at(
            quiz_id,
            user_id,
            score,
            total_possible,
            Utc::now().naive_utc(),
        )
        .await
    }

    pub async fn insert_submission_at(
        &self,
        quiz_id: i32,
        user_id: Option<i32>,
        score: i32,
        total_possible: i32,
        completed_at: NaiveDateTime,
    ) -> Result<SubmissionModel, TestError> {
        Ok(
            entity::prelude::Submissions::insert(entity::submissions::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                quiz_id: ActiveValue::Set(quiz_id),
                score: ActiveValue::Set(score),
                total_possible: ActiveValue::Set(total_possible),
                time_spent: ActiveValue::Set(Some(120)),
                completed_at: ActiveValue::Set(completed_at),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
