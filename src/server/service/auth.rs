use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::{
    model::auth::{LoginDto, RegisterDto},
    server::{
        data::user::{NewUser, UserRepository},
        error::{auth::AuthError, validation::ValidationError, Error},
        model::db::UserModel,
        util::password::{hash_password, verify_password},
    },
};

/// Role assigned to every registered account
pub const DEFAULT_ROLE: &str = "user";

/// Service for registering and authenticating accounts.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new account with the `user` role.
    ///
    /// Emails are trimmed and lowercased before storage so lookups are case-insensitive.
    ///
    /// # Returns
    /// - `Ok(UserModel)` - The created account
    /// - `Err(Error::ValidationError(ValidationError::MissingFields))` - A field is absent or blank
    /// - `Err(Error::AuthError(AuthError::EmailTaken))` - The email is already registered
    /// - `Err(Error)` - Hashing or database failure
    pub async fn register(&self, payload: RegisterDto) -> Result<UserModel, Error> {
        let (Some(email), Some(password), Some(username)) = (
            required(payload.email),
            required(payload.password),
            required(payload.username),
        ) else {
            return Err(ValidationError::MissingFields.into());
        };
        let email = email.to_lowercase();

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = run_blocking(move || hash_password(&password)).await?;

        let result = user_repo
            .create(NewUser {
                email: &email,
                username: &username,
                password_hash: &password_hash,
                role: DEFAULT_ROLE,
            })
            .await;

        match result {
            Ok(user) => Ok(user),
            // Registered concurrently between the lookup and the insert
            Err(err) if is_unique_violation(&err) => Err(AuthError::EmailTaken.into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Checks credentials and returns the matching account.
    ///
    /// # Returns
    /// - `Ok(UserModel)` - Email and password match
    /// - `Err(Error::ValidationError(ValidationError::MissingFields))` - A field is absent or blank
    /// - `Err(Error::AuthError(AuthError::InvalidCredentials))` - Unknown email or wrong password
    pub async fn login(&self, payload: LoginDto) -> Result<UserModel, Error> {
        let (Some(email), Some(password)) = (required(payload.email), required(payload.password))
        else {
            return Err(ValidationError::MissingFields.into());
        };

        let Some(user) = UserRepository::new(self.db)
            .find_by_email(&email.to_lowercase())
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let password_hash = user.password_hash.clone();
        let valid = run_blocking(move || verify_password(&password, &password_hash)).await?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

/// Trimmed value, `None` when absent or blank
fn required(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Runs CPU bound password work off the async runtime
async fn run_blocking<T, F>(f: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::InternalError(format!("Password hashing task failed: {}", e)))?;

    Ok(result?)
}
