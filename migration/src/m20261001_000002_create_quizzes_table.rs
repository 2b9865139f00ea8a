use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261001_000001_create_users_table::Users;

static IDX_QUIZZES_CATEGORY: &str = "idx_quizzes_category";
static FK_QUIZZES_CREATED_BY: &str = "fk_quizzes_created_by";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(pk_auto(Quizzes::Id))
                    .col(string(Quizzes::Title))
                    .col(text_null(Quizzes::Description))
                    .col(string_null(Quizzes::Category))
                    .col(string(Quizzes::Difficulty).default("medium"))
                    .col(integer_null(Quizzes::TimeLimit))
                    .col(boolean(Quizzes::IsPublished).default(false))
                    .col(integer_null(Quizzes::CreatedBy))
                    .col(timestamp(Quizzes::CreatedAt))
                    .col(timestamp(Quizzes::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_QUIZZES_CATEGORY)
                    .table(Quizzes::Table)
                    .col(Quizzes::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_QUIZZES_CREATED_BY)
                    .from_tbl(Quizzes::Table)
                    .from_col(Quizzes::CreatedBy)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_QUIZZES_CREATED_BY)
                    .table(Quizzes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_QUIZZES_CATEGORY)
                    .table(Quizzes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Quizzes::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Quizzes {
    Table,
    Id,
    Title,
    Description,
    Category,
    Difficulty,
    TimeLimit,
    IsPublished,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
