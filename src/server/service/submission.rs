use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::quiz::{SubmissionDto, SubmitQuizDto},
    server::{
        data::{
            question::{PossibleAnswerRepository, QuestionRepository},
            quiz::QuizRepository,
            submission::{NewSubmission, SubmissionRepository},
            user::UserRepository,
            user_answer::{NewUserAnswer, UserAnswerRepository},
        },
        error::{quiz::QuizError, validation::ValidationError, Error},
        query::{QueryCache, Table},
        util::score::{round2, score_percentage},
    },
};

/// Service recording quiz attempts.
pub struct SubmissionService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a QueryCache,
}

impl<'a> SubmissionService<'a> {
    /// Creates a new instance of [`SubmissionService`]
    pub fn new(db: &'a DatabaseConnection, cache: &'a QueryCache) -> Self {
        Self { db, cache }
    }

    /// Records a completed attempt.
    ///
    /// Inside one transaction the submission row and one `user_answers` row per answered
    /// question are written, `is_correct` being taken from the selected possible answer.
    /// For a logged in user the profile statistics are updated as well.
    ///
    /// # Arguments
    /// - `user_id` - Session user, `None` for anonymous attempts
    /// - `payload` - Score, total and the optional per-question answers
    ///
    /// # Returns
    /// - `Ok(SubmissionDto)` - The recorded submission
    /// - `Err(Error::ValidationError)` - Missing fields, negative values, a score above the
    ///   total, or answers that do not belong to the quiz
    /// - `Err(Error::QuizError(QuizError::NotFound))` - Unknown or unpublished quiz
    pub async fn submit(
        &self,
        user_id: Option<i32>,
        payload: SubmitQuizDto,
    ) -> Result<SubmissionDto, Error> {
        let (Some(quiz_id), Some(score), Some(total_possible)) =
            (payload.quiz_id, payload.score, payload.total_possible)
        else {
            return Err(ValidationError::MissingFields.into());
        };
        validate_score(score, total_possible, payload.time_spent)?;

        let txn = self.db.begin().await?;

        let published = QuizRepository::new(&txn)
            .get(quiz_id)
            .await?
            .is_some_and(|quiz| quiz.is_published);
        if !published {
            return Err(QuizError::NotFound(quiz_id).into());
        }

        let answers = payload.answers.unwrap_or_default();
        let user_answers = if answers.is_empty() {
            Vec::new()
        } else {
            let question_ids: Vec<i32> = QuestionRepository::new(&txn)
                .get_by_quiz_id(quiz_id)
                .await?
                .into_iter()
                .map(|question| question.id)
                .collect();
            let selected_ids = answers
                .iter()
                .filter_map(|answer| answer.selected_answer_id)
                .collect();
            let possible_answers: HashMap<i32, (i32, bool)> = PossibleAnswerRepository::new(&txn)
                .get_many(selected_ids)
                .await?
                .into_iter()
                .map(|answer| (answer.id, (answer.question_id, answer.is_correct)))
                .collect();

            let mut user_answers = Vec::with_capacity(answers.len());
            for answer in answers {
                if !question_ids.contains(&answer.question_id) {
                    return Err(ValidationError::ForeignQuestion {
                        quiz_id,
                        question_id: answer.question_id,
                    }
                    .into());
                }

                let is_correct = match answer.selected_answer_id {
                    None => false,
                    Some(answer_id) => match possible_answers.get(&answer_id) {
                        Some((question_id, is_correct)) if *question_id == answer.question_id => {
                            *is_correct
                        }
                        _ => {
                            return Err(ValidationError::ForeignAnswer {
                                question_id: answer.question_id,
                                answer_id,
                            }
                            .into())
                        }
                    },
                };

                user_answers.push(NewUserAnswer {
                    question_id: answer.question_id,
                    selected_answer_id: answer.selected_answer_id,
                    is_correct,
                });
            }
            user_answers
        };

        let submission = SubmissionRepository::new(&txn)
            .create(NewSubmission {
                user_id,
                quiz_id,
                score,
                total_possible,
                time_spent: payload.time_spent,
            })
            .await?;
        UserAnswerRepository::new(&txn)
            .create_many(submission.id, user_answers)
            .await?;

        if let Some(user_id) = user_id {
            if UserRepository::new(&txn)
                .record_quiz_result(user_id, score)
                .await?
                .is_none()
            {
                tracing::warn!(
                    user_id = %user_id,
                    "Submission recorded for a session user missing from the database"
                );
            }
        }

        txn.commit().await?;

        self.cache.invalidate_table(Table::Submissions);
        self.cache.invalidate_table(Table::UserAnswers);
        self.cache.invalidate_table(Table::Users);

        Ok(SubmissionDto {
            id: submission.id,
            quiz_id: submission.quiz_id,
            user_id: submission.user_id,
            score: submission.score,
            total_possible: submission.total_possible,
            percentage: round2(score_percentage(submission.score, submission.total_possible)),
            time_spent: submission.time_spent,
            completed_at: submission.completed_at,
        })
    }
}

fn validate_score(
    score: i32,
    total_possible: i32,
    time_spent: Option<i32>,
) -> Result<(), ValidationError> {
    if score < 0 || total_possible < 0 {
        return Err(ValidationError::InvalidScore(
            "score and total_possible must not be negative".to_string(),
        ));
    }
    if score > total_possible {
        return Err(ValidationError::InvalidScore(format!(
            "score {} exceeds total_possible {}",
            score, total_possible
        )));
    }
    if time_spent.is_some_and(|time_spent| time_spent < 0) {
        return Err(ValidationError::InvalidScore(
            "time_spent must not be negative".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use quizmaster_test_utils::prelude::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    use crate::{
        model::quiz::{SubmitQuizDto, SubmittedAnswerDto},
        server::{
            data::user_answer::UserAnswerRepository,
            error::{quiz::QuizError, validation::ValidationError, Error},
            query::QueryCache,
            service::submission::SubmissionService,
        },
    };

    fn payload(quiz_id: i32, score: i32, total_possible: i32) -> SubmitQuizDto {
        SubmitQuizDto {
            quiz_id: Some(quiz_id),
            score: Some(score),
            total_possible: Some(total_possible),
            time_spent: Some(95),
            answers: None,
        }
    }

    /// Expect 8 out of 10 to update the profile statistics of the user
    #[tokio::test]
    async fn updates_user_statistics() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let user = test.user().insert_user(TEST_USER_EMAIL).await?;
        let quiz = test.quiz().insert_quiz("Capitals", true).await?;
        let cache = QueryCache::default();
        let submission_service = SubmissionService::new(&test.db, &cache);

        let submission = submission_service
            .submit(Some(user.id), payload(quiz.id, 8, 10))
            .await
            .unwrap();
        assert_eq!(submission.percentage, 80.0);

        let user = entity::prelude::Users::find_by_id(user.id)
            .one(&test.db)
            .await?
            .unwrap();
        assert_eq!(user.quizzes_taken, 1);
        assert_eq!(user.total_points, 8);
        assert_eq!(user.average_score, 8.0);

        submission_service
            .submit(Some(user.id), payload(quiz.id, 3, 10))
            .await
            .unwrap();
        let user = entity::prelude::Users::find_by_id(user.id)
            .one(&test.db)
            .await?
            .unwrap();
        assert_eq!(user.quizzes_taken, 2);
        assert_eq!(user.average_score, 11.0 / 2.0);

        Ok(())
    }

    /// Expect anonymous attempts to be recorded without touching any user
    #[tokio::test]
    async fn records_anonymous_submission() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let quiz = test.quiz().insert_quiz("Capitals", true).await?;
        let cache = QueryCache::default();

        let submission = SubmissionService::new(&test.db, &cache)
            .submit(None, payload(quiz.id, 2, 4))
            .await
            .unwrap();

        assert_eq!(submission.user_id, None);
        assert_eq!(submission.percentage, 50.0);

        Ok(())
    }

    /// Expect per-question answers with correctness looked up from the selected answer
    #[tokio::test]
    async fn stores_answers_with_correctness() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let quiz = test.quiz().insert_quiz("Capitals", true).await?;
        let (first, first_answers) = test
            .quiz()
            .insert_question(quiz.id, 1, &[("Paris", true), ("Lyon", false)])
            .await?;
        let (second, second_answers) = test
            .quiz()
            .insert_question(quiz.id, 2, &[("Rome", true), ("Milan", false)])
            .await?;
        let cache = QueryCache::default();

        let mut submit = payload(quiz.id, 1, 2);
        submit.answers = Some(vec![
            SubmittedAnswerDto {
                question_id: first.id,
                selected_answer_id: Some(first_answers[0].id),
            },
            SubmittedAnswerDto {
                question_id: second.id,
                selected_answer_id: Some(second_answers[1].id),
            },
        ]);
        let submission = SubmissionService::new(&test.db, &cache)
            .submit(None, submit)
            .await
            .unwrap();

        let stored = UserAnswerRepository::new(&test.db)
            .get_by_submission_id(submission.id)
            .await?;
        let correctness: Vec<bool> = stored.iter().map(|a| a.is_correct).collect();
        assert_eq!(correctness, vec![true, false]);

        Ok(())
    }

    /// Expect an answer of another question to be rejected and nothing recorded
    #[tokio::test]
    async fn rejects_answer_of_other_question() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let quiz = test.quiz().insert_quiz("Capitals", true).await?;
        let (first, _) = test
            .quiz()
            .insert_question(quiz.id, 1, &[("Paris", true)])
            .await?;
        let (_, second_answers) = test
            .quiz()
            .insert_question(quiz.id, 2, &[("Rome", true)])
            .await?;
        let cache = QueryCache::default();

        let mut submit = payload(quiz.id, 1, 2);
        submit.answers = Some(vec![SubmittedAnswerDto {
            question_id: first.id,
            selected_answer_id: Some(second_answers[0].id),
        }]);
        let result = SubmissionService::new(&test.db, &cache)
            .submit(None, submit)
            .await;

        assert!(matches!(
            result,
            Err(Error::ValidationError(ValidationError::ForeignAnswer { .. }))
        ));
        assert_eq!(entity::prelude::Submissions::find().count(&test.db).await?, 0);

        Ok(())
    }

    /// Expect MissingFields when the score is absent
    #[tokio::test]
    async fn rejects_missing_fields() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let quiz = test.quiz().insert_quiz("Capitals", true).await?;
        let cache = QueryCache::default();

        let mut submit = payload(quiz.id, 1, 2);
        submit.score = None;
        let result = SubmissionService::new(&test.db, &cache)
            .submit(None, submit)
            .await;

        assert!(matches!(
            result,
            Err(Error::ValidationError(ValidationError::MissingFields))
        ));

        Ok(())
    }

    /// Expect InvalidScore for negative values or a score above the total
    #[tokio::test]
    async fn rejects_invalid_scores() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let quiz = test.quiz().insert_quiz("Capitals", true).await?;
        let cache = QueryCache::default();
        let submission_service = SubmissionService::new(&test.db, &cache);

        for (score, total) in [(-1, 10), (11, 10), (0, -1)] {
            let result = submission_service
                .submit(None, payload(quiz.id, score, total))
                .await;
            assert!(matches!(
                result,
                Err(Error::ValidationError(ValidationError::InvalidScore(_)))
            ));
        }

        Ok(())
    }

    /// Expect NotFound for an unknown quiz
    #[tokio::test]
    async fn fails_for_nonexistent_quiz() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let cache = QueryCache::default();

        let result = SubmissionService::new(&test.db, &cache)
            .submit(None, payload(1, 1, 2))
            .await;

        assert!(matches!(result, Err(Error::QuizError(QuizError::NotFound(1)))));

        Ok(())
    }

    /// Expect NotFound and nothing recorded for an unpublished quiz
    #[tokio::test]
    async fn rejects_unpublished_quiz() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let quiz = test.quiz().insert_quiz("Draft", false).await?;
        let cache = QueryCache::default();

        let result = SubmissionService::new(&test.db, &cache)
            .submit(None, payload(quiz.id, 1, 2))
            .await;

        assert!(matches!(result, Err(Error::QuizError(QuizError::NotFound(_)))));
        assert_eq!(
            entity::prelude::Submissions::find().count(&test.db).await?,
            0
        );

        Ok(())
    }

    /// Expect repeated maximal scores to accumulate without overflowing
    #[tokio::test]
    async fn accumulates_large_scores() -> Result<(), TestError> {
        let test = test_setup_with_quiz_tables!()?;
        let user = test.user().insert_user(TEST_USER_EMAIL).await?;
        let quiz = test.quiz().insert_quiz("Capitals", true).await?;
        let cache = QueryCache::default();
        let submission_service = SubmissionService::new(&test.db, &cache);

        for _ in 0..2 {
            submission_service
                .submit(Some(user.id), payload(quiz.id, 2_000_000_000, 2_000_000_000))
                .await
                .unwrap();
        }

        let user = entity::prelude::Users::find_by_id(user.id)
            .one(&test.db)
            .await?
            .unwrap();
        assert_eq!(user.quizzes_taken, 2);
        assert_eq!(user.total_points, 4_000_000_000);

        Ok(())
    }
}
