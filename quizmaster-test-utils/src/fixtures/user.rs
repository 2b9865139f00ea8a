use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use std::sync::OnceLock;

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::{TEST_PASSWORD, TEST_PASSWORD_SALT},
    error::TestError,
    model::UserModel,
    TestContext,
};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert a user with the `user` role
    pub async fn insert_user(&self, email: &str) -> Result<UserModel, TestError> {
        self.insert_user_with_role(email, "user").await
    }

    /// Insert a user with the `admin` role
    pub async fn insert_admin(&self, email: &str) -> Result<UserModel, TestError> {
        self.insert_user_with_role(email, "admin").await
    }

    pub async fn insert_user_with_role(
        &self,
        email: &str,
        role: &str,
    ) -> Result<UserModel, TestError> {
        let now = Utc::now().naive_utc();
        let username = email.split('@').next().unwrap_or(email).to_string();

        Ok(entity::prelude::Users::insert(entity::users::ActiveModel {
            email: ActiveValue::Set(email.to_string()),
            username: ActiveValue::Set(username),
            password_hash: ActiveValue::Set(test_password_hash()?),
            role: ActiveValue::Set(role.to_string()),
            quizzes_taken: ActiveValue::Set(0),
            total_points: ActiveValue::Set(0),
            average_score: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}

static TEST_PASSWORD_HASH: OnceLock<String> = OnceLock::new();

fn test_password_hash() -> Result<String, TestError> {
    if let Some(hash) = TEST_PASSWORD_HASH.get() {
        return Ok(hash.clone());
    }

    let hash = hash_test_password(TEST_PASSWORD)?;
    Ok(TEST_PASSWORD_HASH.get_or_init(|| hash).clone())
}

/// Hash `password` the same way the server does, with a fixed salt.
pub fn hash_test_password(password: &str) -> Result<String, TestError> {
    let salt = SaltString::encode_b64(TEST_PASSWORD_SALT)
        .map_err(|e| TestError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| TestError::PasswordHash(e.to_string()))
}
