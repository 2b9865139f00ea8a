use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261001_000002_create_quizzes_table::Quizzes;

static IDX_QUESTIONS_QUIZ_ID: &str = "idx_questions_quiz_id";
static FK_QUESTIONS_QUIZ_ID: &str = "fk_questions_quiz_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(pk_auto(Questions::Id))
                    .col(integer(Questions::QuizId))
                    .col(text(Questions::QuestionText))
                    .col(string(Questions::QuestionType).default("multiple_choice"))
                    .col(integer(Questions::Points).default(1))
                    .col(integer(Questions::Position).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_QUESTIONS_QUIZ_ID)
                    .table(Questions::Table)
                    .col(Questions::QuizId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_QUESTIONS_QUIZ_ID)
                    .from_tbl(Questions::Table)
                    .from_col(Questions::QuizId)
                    .to_tbl(Quizzes::Table)
                    .to_col(Quizzes::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_QUESTIONS_QUIZ_ID)
                    .table(Questions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_QUESTIONS_QUIZ_ID)
                    .table(Questions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Questions {
    Table,
    Id,
    QuizId,
    QuestionText,
    QuestionType,
    Points,
    Position,
}
