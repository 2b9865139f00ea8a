use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20261001_000001_create_users_table::Users, m20261001_000002_create_quizzes_table::Quizzes,
};

static IDX_SUBMISSIONS_USER_ID: &str = "idx_submissions_user_id";
static IDX_SUBMISSIONS_QUIZ_ID: &str = "idx_submissions_quiz_id";
static FK_SUBMISSIONS_USER_ID: &str = "fk_submissions_user_id";
static FK_SUBMISSIONS_QUIZ_ID: &str = "fk_submissions_quiz_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(pk_auto(Submissions::Id))
                    .col(integer_null(Submissions::UserId))
                    .col(integer(Submissions::QuizId))
                    .col(integer(Submissions::Score))
                    .col(integer(Submissions::TotalPossible))
                    .col(integer_null(Submissions::TimeSpent))
                    .col(timestamp(Submissions::CompletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBMISSIONS_USER_ID)
                    .table(Submissions::Table)
                    .col(Submissions::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBMISSIONS_QUIZ_ID)
                    .table(Submissions::Table)
                    .col(Submissions::QuizId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SUBMISSIONS_USER_ID)
                    .from_tbl(Submissions::Table)
                    .from_col(Submissions::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SUBMISSIONS_QUIZ_ID)
                    .from_tbl(Submissions::Table)
                    .from_col(Submissions::QuizId)
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
                    .name(FK_SUBMISSIONS_QUIZ_ID)
                    .table(Submissions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SUBMISSIONS_USER_ID)
                    .table(Submissions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SUBMISSIONS_QUIZ_ID)
                    .table(Submissions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SUBMISSIONS_USER_ID)
                    .table(Submissions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Submissions {
    Table,
    Id,
    UserId,
    QuizId,
    Score,
    TotalPossible,
    TimeSpent,
    CompletedAt,
}
