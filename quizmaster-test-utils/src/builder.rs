//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! Configuration methods are chained together and all operations are queued and executed during
//! the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and
/// fixtures. Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_quiz_tables: bool,

    // Database fixtures to insert
    users: Vec<String>,
    admins: Vec<String>,
    quizzes: Vec<(String, bool)>, // (title, is_published)
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_quiz_tables: false,
            users: Vec::new(),
            admins: Vec::new(),
            quizzes: Vec::new(),
        }
    }

    /// Add every QuizMaster table to the test database.
    ///
    /// Tables are created in foreign key order: users, quizzes, questions,
    /// question_possible_answers, submissions, user_answers.
    pub fn with_quiz_tables(mut self) -> Self {
        self.include_quiz_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use quizmaster_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), quizmaster_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Users)
    ///     .with_table(Quizzes)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a regular user with [`TEST_PASSWORD`](crate::constant::TEST_PASSWORD)
    pub fn with_user(mut self, email: impl Into<String>) -> Self {
        self.users.push(email.into());
        self
    }

    /// Insert an admin user with [`TEST_PASSWORD`](crate::constant::TEST_PASSWORD)
    pub fn with_admin(mut self, email: impl Into<String>) -> Self {
        self.admins.push(email.into());
        self
    }

    /// Insert a quiz without questions
    pub fn with_quiz(mut self, title: impl Into<String>, is_published: bool) -> Self {
        self.quizzes.push((title.into(), is_published));
        self
    }

    /// Build the test context, executing all queued operations.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Tables created and fixtures inserted
    /// - `Err(TestError)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        let mut all_tables = Vec::new();
        if self.include_quiz_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend([
                schema.create_table_from_entity(entity::prelude::Users),
                schema.create_table_from_entity(entity::prelude::Quizzes),
                schema.create_table_from_entity(entity::prelude::Questions),
                schema.create_table_from_entity(entity::prelude::QuestionPossibleAnswers),
                schema.create_table_from_entity(entity::prelude::Submissions),
                schema.create_table_from_entity(entity::prelude::UserAnswers),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for email in self.users {
            setup.user().insert_user(&email).await?;
        }

        for email in self.admins {
            setup.user().insert_admin(&email).await?;
        }

        for (title, is_published) in self.quizzes {
            setup.quiz().insert_quiz(&title, is_published).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
