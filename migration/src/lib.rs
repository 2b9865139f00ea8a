pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users_table;
mod m20261001_000002_create_quizzes_table;
mod m20261001_000003_create_questions_table;
mod m20261001_000004_create_question_possible_answers_table;
mod m20261001_000005_create_submissions_table;
mod m20261001_000006_create_user_answers_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users_table::Migration),
            Box::new(m20261001_000002_create_quizzes_table::Migration),
            Box::new(m20261001_000003_create_questions_table::Migration),
            Box::new(m20261001_000004_create_question_possible_answers_table::Migration),
            Box::new(m20261001_000005_create_submissions_table::Migration),
            Box::new(m20261001_000006_create_user_answers_table::Migration),
        ]
    }
}
