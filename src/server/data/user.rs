use chrono::Utc;
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

/// Fields of a new account
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user with empty statistics
    pub async fn create(&self, user: NewUser<'_>) -> Result<entity::users::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let user = entity::users::ActiveModel {
            email: ActiveValue::Set(user.email.to_string()),
            username: ActiveValue::Set(user.username.to_string()),
            password_hash: ActiveValue::Set(user.password_hash.to_string()),
            role: ActiveValue::Set(user.role.to_string()),
            quizzes_taken: ActiveValue::Set(0),
            total_points: ActiveValue::Set(0),
            average_score: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::users::Model>, DbErr> {
        entity::prelude::Users::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::users::Model>, DbErr> {
        entity::prelude::Users::find()
            .filter(entity::users::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, user_ids: Vec<i32>) -> Result<Vec<entity::users::Model>, DbErr> {
        entity::prelude::Users::find()
            .filter(entity::users::Column::Id.is_in(user_ids))
            .all(self.db)
            .await
    }

    /// Every user, newest account first
    pub async fn get_all(&self) -> Result<Vec<entity::users::Model>, DbErr> {
        entity::prelude::Users::find()
            .order_by_desc(entity::users::Column::CreatedAt)
            .order_by_desc(entity::users::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Users::find().count(self.db).await
    }

    /// Returns `None` if the user does not exist
    pub async fn update_role(
        &self,
        user_id: i32,
        role: &str,
    ) -> Result<Option<entity::users::Model>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.role = ActiveValue::Set(role.to_string());
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(user_am.update(self.db).await?))
    }

    /// Adds a completed quiz to the user's statistics.
    ///
    /// `quizzes_taken` is incremented and `score` is added to `total_points` in a single
    /// `UPDATE`, which holds the row lock until the surrounding transaction ends.
    /// `average_score` is then recomputed as `total_points / quizzes_taken`. Returns `None`
    /// if the user does not exist.
    pub async fn record_quiz_result(
        &self,
        user_id: i32,
        score: i32,
    ) -> Result<Option<entity::users::Model>, DbErr> {
        use sea_orm::sea_query::ExprTrait;

        let result = entity::prelude::Users::update_many()
            .col_expr(
                entity::users::Column::QuizzesTaken,
                Expr::col(entity::users::Column::QuizzesTaken).add(1),
            )
            .col_expr(
                entity::users::Column::TotalPoints,
                Expr::col(entity::users::Column::TotalPoints).add(i64::from(score)),
            )
            .col_expr(
                entity::users::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(Expr::col(entity::users::Column::Id).eq(user_id))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let average_score = user.total_points as f64 / user.quizzes_taken as f64;
        let mut user_am = user.into_active_model();
        user_am.average_score = ActiveValue::Set(average_score);

        Ok(Some(user_am.update(self.db).await?))
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use quizmaster_test_utils::prelude::*;

        use crate::server::data::user::{NewUser, UserRepository};

        fn new_user(email: &str) -> NewUser<'_> {
            NewUser {
                email,
                username: "player",
                password_hash: "hash",
                role: "user",
            }
        }

        /// Expect success with zeroed statistics when creating a new user
        #[tokio::test]
        async fn creates_user() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user_repo = UserRepository::new(&test.db);

            let user = user_repo.create(new_user(TEST_USER_EMAIL)).await?;

            assert_eq!(user.email, TEST_USER_EMAIL);
            assert_eq!(user.quizzes_taken, 0);
            assert_eq!(user.average_score, 0.0);

            Ok(())
        }

        /// Expect Error when the email is already registered
        #[tokio::test]
        async fn fails_for_duplicate_email() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user_repo = UserRepository::new(&test.db);
            user_repo.create(new_user(TEST_USER_EMAIL)).await?;

            let result = user_repo.create(new_user(TEST_USER_EMAIL)).await;

            assert!(result.is_err());

            Ok(())
        }

        /// Expect Error when required database tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;
            let user_repo = UserRepository::new(&test.db);

            let result = user_repo.create(new_user(TEST_USER_EMAIL)).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod find_by_email {
        use quizmaster_test_utils::prelude::*;

        use crate::server::data::user::UserRepository;

        /// Expect Some for a registered email and None otherwise
        #[tokio::test]
        async fn finds_registered_email() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            let user_repo = UserRepository::new(&test.db);

            let found = user_repo.find_by_email(TEST_USER_EMAIL).await?;
            let missing = user_repo.find_by_email("nobody@example.com").await?;

            assert_eq!(found.map(|u| u.id), Some(user.id));
            assert!(missing.is_none());

            Ok(())
        }
    }

    mod update_role {
        use quizmaster_test_utils::prelude::*;

        use crate::server::data::user::UserRepository;

        /// Expect the role to be replaced
        #[tokio::test]
        async fn updates_existing_user() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            let user_repo = UserRepository::new(&test.db);

            let result = user_repo.update_role(user.id, "admin").await?;

            assert_eq!(result.map(|u| u.role), Some("admin".to_string()));

            Ok(())
        }

        /// Expect Ok(None) when the user does not exist
        #[tokio::test]
        async fn returns_none_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user_repo = UserRepository::new(&test.db);

            let result = user_repo.update_role(1, "admin").await;

            assert!(matches!(result, Ok(None)));

            Ok(())
        }
    }

    mod record_quiz_result {
        use quizmaster_test_utils::prelude::*;

        use crate::server::data::user::UserRepository;

        /// Expect statistics to accumulate across results
        #[tokio::test]
        async fn accumulates_statistics() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            let user_repo = UserRepository::new(&test.db);

            user_repo.record_quiz_result(user.id, 8).await?;
            let updated = user_repo.record_quiz_result(user.id, 5).await?.unwrap();

            assert_eq!(updated.quizzes_taken, 2);
            assert_eq!(updated.total_points, 13);
            assert_eq!(updated.average_score, 6.5);

            Ok(())
        }

        /// Expect totals beyond the range of a single score to accumulate
        #[tokio::test]
        async fn accumulates_large_scores() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            let user_repo = UserRepository::new(&test.db);

            user_repo.record_quiz_result(user.id, 2_000_000_000).await?;
            let updated = user_repo
                .record_quiz_result(user.id, 2_000_000_000)
                .await?
                .unwrap();

            assert_eq!(updated.quizzes_taken, 2);
            assert_eq!(updated.total_points, 4_000_000_000);
            assert_eq!(updated.average_score, 2_000_000_000.0);

            Ok(())
        }

        /// Expect the increment to build on the stored row rather than a value read earlier
        #[tokio::test]
        async fn increments_stored_values() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user = test.user().insert_user(TEST_USER_EMAIL).await?;
            let user_repo = UserRepository::new(&test.db);
            let stale = user_repo.get(user.id).await?.unwrap();

            user_repo.record_quiz_result(stale.id, 4).await?;
            let updated = user_repo.record_quiz_result(stale.id, 6).await?.unwrap();

            assert_eq!(stale.quizzes_taken, 0);
            assert_eq!(updated.quizzes_taken, 2);
            assert_eq!(updated.total_points, 10);

            Ok(())
        }

        /// Expect Ok(None) when the user does not exist
        #[tokio::test]
        async fn returns_none_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_quiz_tables!()?;
            let user_repo = UserRepository::new(&test.db);

            let result = user_repo.record_quiz_result(1, 8).await;

            assert!(matches!(result, Ok(None)));

            Ok(())
        }
    }
}
