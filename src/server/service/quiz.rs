use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::quiz::{
        CreateQuestionDto, CreateQuizDto, PossibleAnswerDto, QuestionDto, QuizDetailDto,
        QuizListParams, QuizSummaryDto, UpdateQuizDto,
    },
    server::{
        data::{
            question::{NewQuestion, PossibleAnswerRepository, QuestionRepository},
            quiz::{NewQuiz, QuizFilter, QuizRepository},
            submission::SubmissionRepository,
            user_answer::UserAnswerRepository,
        },
        error::{quiz::QuizError, validation::ValidationError, Error},
        model::db::{PossibleAnswerModel, QuestionModel, QuizModel},
        query::{QueryCache, Table},
    },
};

pub const DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];
pub const DEFAULT_DIFFICULTY: &str = "medium";
pub const QUESTION_TYPES: [&str; 2] = ["multiple_choice", "true_false"];
pub const DEFAULT_QUESTION_TYPE: &str = "multiple_choice";
pub const DEFAULT_POINTS: i32 = 1;

fn validate_difficulty(difficulty: &str) -> Result<(), ValidationError> {
    if DIFFICULTIES.contains(&difficulty) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDifficulty(difficulty.to_string()))
    }
}

fn validate_question(question: &CreateQuestionDto) -> Result<(), ValidationError> {
    let question_type = question
        .question_type
        .as_deref()
        .unwrap_or(DEFAULT_QUESTION_TYPE);
    if !QUESTION_TYPES.contains(&question_type) {
        return Err(ValidationError::InvalidQuestionType(
            question_type.to_string(),
        ));
    }
    if let Some(points) = question.points.filter(|points| *points < 0) {
        return Err(ValidationError::InvalidPoints(points));
    }

    Ok(())
}

fn summary_dto(quiz: QuizModel, question_count: u64) -> QuizSummaryDto {
    QuizSummaryDto {
        id: quiz.id,
        title: quiz.title,
        description: quiz.description,
        category: quiz.category,
        difficulty: quiz.difficulty,
        time_limit: quiz.time_limit,
        is_published: quiz.is_published,
        question_count,
        created_at: quiz.created_at,
    }
}

fn detail_dto(
    quiz: QuizModel,
    questions: Vec<QuestionModel>,
    answers: Vec<PossibleAnswerModel>,
) -> QuizDetailDto {
    let mut answers_by_question: HashMap<i32, Vec<PossibleAnswerDto>> = HashMap::new();
    for answer in answers {
        answers_by_question
            .entry(answer.question_id)
            .or_default()
            .push(PossibleAnswerDto {
                id: answer.id,
                answer_text: answer.answer_text,
                is_correct: answer.is_correct,
            });
    }

    QuizDetailDto {
        id: quiz.id,
        title: quiz.title,
        description: quiz.description,
        category: quiz.category,
        difficulty: quiz.difficulty,
        time_limit: quiz.time_limit,
        is_published: quiz.is_published,
        created_at: quiz.created_at,
        questions: questions
            .into_iter()
            .map(|question| QuestionDto {
                answers: answers_by_question.remove(&question.id).unwrap_or_default(),
                id: question.id,
                question_text: question.question_text,
                question_type: question.question_type,
                points: question.points,
                position: question.position,
            })
            .collect(),
    }
}

/// Service for reading and administering quizzes.
pub struct QuizService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a QueryCache,
}

impl<'a> QuizService<'a> {
    /// Creates a new instance of [`QuizService`]
    pub fn new(db: &'a DatabaseConnection, cache: &'a QueryCache) -> Self {
        Self { db, cache }
    }

    /// Lists quizzes newest first with their question counts.
    ///
    /// # Arguments
    /// - `params` - Optional `category` and `difficulty` filters
    /// - `published_only` - Restrict to published quizzes
    pub async fn list(
        &self,
        params: &QuizListParams,
        published_only: bool,
    ) -> Result<Vec<QuizSummaryDto>, Error> {
        let quizzes = QuizRepository::new(self.db)
            .get_many(QuizFilter {
                published_only,
                category: params.category.as_deref(),
                difficulty: params.difficulty.as_deref(),
            })
            .await?;

        let quiz_ids = quizzes.iter().map(|quiz| quiz.id).collect();
        let mut question_counts: HashMap<i32, u64> = HashMap::new();
        for quiz_id in QuestionRepository::new(self.db)
            .get_quiz_ids(quiz_ids)
            .await?
        {
            *question_counts.entry(quiz_id).or_default() += 1;
        }

        Ok(quizzes
            .into_iter()
            .map(|quiz| {
                let count = question_counts.get(&quiz.id).copied().unwrap_or_default();
                summary_dto(quiz, count)
            })
            .collect())
    }

    /// Quiz with questions ordered by position and their possible answers.
    ///
    /// # Returns
    /// - `Ok(QuizDetailDto)` - Quiz found
    /// - `Err(Error::QuizError(QuizError::NotFound))` - No quiz with the ID, or the quiz is
    ///   unpublished and `published_only` is set
    pub async fn get(&self, quiz_id: i32, published_only: bool) -> Result<QuizDetailDto, Error> {
        let quiz = QuizRepository::new(self.db)
            .get(quiz_id)
            .await?
            .filter(|quiz| quiz.is_published || !published_only)
            .ok_or(QuizError::NotFound(quiz_id))?;

        let questions = QuestionRepository::new(self.db)
            .get_by_quiz_id(quiz.id)
            .await?;
        let question_ids = questions.iter().map(|question| question.id).collect();
        let answers = PossibleAnswerRepository::new(self.db)
            .get_by_question_ids(question_ids)
            .await?;

        Ok(detail_dto(quiz, questions, answers))
    }

    /// Creates a quiz with its questions and answers in one transaction.
    ///
    /// Questions are positioned in the order they are listed, starting at 1.
    pub async fn create(
        &self,
        created_by: i32,
        payload: CreateQuizDto,
    ) -> Result<QuizDetailDto, Error> {
        let title = payload.title.trim();
        if title.is_empty() || payload.questions.iter().any(|q| q.question_text.trim().is_empty())
        {
            return Err(ValidationError::MissingFields.into());
        }
        let difficulty = payload.difficulty.as_deref().unwrap_or(DEFAULT_DIFFICULTY);
        validate_difficulty(difficulty)?;
        for question in &payload.questions {
            validate_question(question)?;
        }

        let txn = self.db.begin().await?;

        let quiz = QuizRepository::new(&txn)
            .create(NewQuiz {
                title,
                description: payload.description.as_deref(),
                category: payload.category.as_deref(),
                difficulty,
                time_limit: payload.time_limit,
                is_published: payload.is_published,
                created_by: Some(created_by),
            })
            .await?;

        let question_repo = QuestionRepository::new(&txn);
        let answer_repo = PossibleAnswerRepository::new(&txn);
        let mut questions = Vec::with_capacity(payload.questions.len());
        let mut answers = Vec::new();
        for (index, question) in payload.questions.iter().enumerate() {
            let created = question_repo
                .create(NewQuestion {
                    quiz_id: quiz.id,
                    question_text: question.question_text.trim(),
                    question_type: question
                        .question_type
                        .as_deref()
                        .unwrap_or(DEFAULT_QUESTION_TYPE),
                    points: question.points.unwrap_or(DEFAULT_POINTS),
                    position: index as i32 + 1,
                })
                .await?;

            for answer in &question.answers {
                answers.push(
                    answer_repo
                        .create(created.id, &answer.answer_text, answer.is_correct)
                        .await?,
                );
            }
            questions.push(created);
        }

        txn.commit().await?;

        self.cache.invalidate_table(Table::Quizzes);
        self.cache.invalidate_table(Table::Questions);
        self.cache.invalidate_table(Table::QuestionPossibleAnswers);

        tracing::info!(quiz_id = %quiz.id, created_by = %created_by, "Created quiz");

        Ok(detail_dto(quiz, questions, answers))
    }

    /// Updates quiz metadata, absent fields are left unchanged
    pub async fn update(
        &self,
        quiz_id: i32,
        payload: UpdateQuizDto,
    ) -> Result<QuizSummaryDto, Error> {
        if let Some(difficulty) = &payload.difficulty {
            validate_difficulty(difficulty)?;
        }
        if payload.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(ValidationError::MissingFields.into());
        }

        let quiz = QuizRepository::new(self.db)
            .update(quiz_id, payload)
            .await?
            .ok_or(QuizError::NotFound(quiz_id))?;
        let question_count = QuestionRepository::new(self.db)
            .get_quiz_ids(vec![quiz.id])
            .await?
            .len() as u64;

        self.cache.invalidate_table(Table::Quizzes);

        Ok(summary_dto(quiz, question_count))
    }

    /// Deletes a quiz and everything that references it in one transaction.
    ///
    /// Rows are removed children first: user answers of the quiz's submissions, the
    /// submissions, possible answers, questions and finally the quiz row.
    pub async fn delete(&self, quiz_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let quiz_repo = QuizRepository::new(&txn);
        if quiz_repo.get(quiz_id).await?.is_none() {
            return Err(QuizError::NotFound(quiz_id).into());
        }

        let submission_repo = SubmissionRepository::new(&txn);
        let submission_ids = submission_repo.get_ids_by_quiz_id(quiz_id).await?;
        UserAnswerRepository::new(&txn)
            .delete_by_submission_ids(submission_ids)
            .await?;
        submission_repo.delete_by_quiz_id(quiz_id).await?;
        PossibleAnswerRepository::new(&txn)
            .delete_by_quiz_id(quiz_id)
            .await?;
        QuestionRepository::new(&txn)
            .delete_by_quiz_id(quiz_id)
            .await?;
        quiz_repo.delete(quiz_id).await?;

        txn.commit().await?;

        for table in [
            Table::Quizzes,
            Table::Questions,
            Table::QuestionPossibleAnswers,
            Table::Submissions,
            Table::UserAnswers,
        ] {
            self.cache.invalidate_table(table);
        }

        tracing::info!(quiz_id = %quiz_id, "Deleted quiz");

        Ok(())
    }
}
