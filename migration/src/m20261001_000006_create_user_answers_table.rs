use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20261001_000003_create_questions_table::Questions,
    m20261001_000004_create_question_possible_answers_table::QuestionPossibleAnswers,
    m20261001_000005_create_submissions_table::Submissions,
};

static IDX_USER_ANSWERS_SUBMISSION_ID: &str = "idx_user_answers_submission_id";
static FK_USER_ANSWERS_SUBMISSION_ID: &str = "fk_user_answers_submission_id";
static FK_USER_ANSWERS_QUESTION_ID: &str = "fk_user_answers_question_id";
static FK_USER_ANSWERS_SELECTED_ANSWER_ID: &str = "fk_user_answers_selected_answer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAnswers::Table)
                    .if_not_exists()
                    .col(pk_auto(UserAnswers::Id))
                    .col(integer(UserAnswers::SubmissionId))
                    .col(integer(UserAnswers::QuestionId))
                    .col(integer_null(UserAnswers::SelectedAnswerId))
                    .col(boolean(UserAnswers::IsCorrect).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_ANSWERS_SUBMISSION_ID)
                    .table(UserAnswers::Table)
                    .col(UserAnswers::SubmissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_USER_ANSWERS_SUBMISSION_ID)
                    .from_tbl(UserAnswers::Table)
                    .from_col(UserAnswers::SubmissionId)
                    .to_tbl(Submissions::Table)
                    .to_col(Submissions::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_USER_ANSWERS_QUESTION_ID)
                    .from_tbl(UserAnswers::Table)
                    .from_col(UserAnswers::QuestionId)
                    .to_tbl(Questions::Table)
                    .to_col(Questions::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_USER_ANSWERS_SELECTED_ANSWER_ID)
                    .from_tbl(UserAnswers::Table)
                    .from_col(UserAnswers::SelectedAnswerId)
                    .to_tbl(QuestionPossibleAnswers::Table)
                    .to_col(QuestionPossibleAnswers::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [
            FK_USER_ANSWERS_SELECTED_ANSWER_ID,
            FK_USER_ANSWERS_QUESTION_ID,
            FK_USER_ANSWERS_SUBMISSION_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(UserAnswers::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_ANSWERS_SUBMISSION_ID)
                    .table(UserAnswers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UserAnswers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum UserAnswers {
    Table,
    Id,
    SubmissionId,
    QuestionId,
    SelectedAnswerId,
    IsCorrect,
}
