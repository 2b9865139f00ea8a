use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261001_000003_create_questions_table::Questions;

static IDX_POSSIBLE_ANSWERS_QUESTION_ID: &str = "idx_question_possible_answers_question_id";
static FK_POSSIBLE_ANSWERS_QUESTION_ID: &str = "fk_question_possible_answers_question_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuestionPossibleAnswers::Table)
                    .if_not_exists()
                    .col(pk_auto(QuestionPossibleAnswers::Id))
                    .col(integer(QuestionPossibleAnswers::QuestionId))
                    .col(text(QuestionPossibleAnswers::AnswerText))
                    .col(boolean(QuestionPossibleAnswers::IsCorrect).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_POSSIBLE_ANSWERS_QUESTION_ID)
                    .table(QuestionPossibleAnswers::Table)
                    .col(QuestionPossibleAnswers::QuestionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_POSSIBLE_ANSWERS_QUESTION_ID)
                    .from_tbl(QuestionPossibleAnswers::Table)
                    .from_col(QuestionPossibleAnswers::QuestionId)
                    .to_tbl(Questions::Table)
                    .to_col(Questions::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_POSSIBLE_ANSWERS_QUESTION_ID)
                    .table(QuestionPossibleAnswers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_POSSIBLE_ANSWERS_QUESTION_ID)
                    .table(QuestionPossibleAnswers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(QuestionPossibleAnswers::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum QuestionPossibleAnswers {
    Table,
    Id,
    QuestionId,
    AnswerText,
    IsCorrect,
}
