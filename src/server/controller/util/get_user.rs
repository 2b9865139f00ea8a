use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, db::UserModel, session::user::SessionUserId},
    service::user::UserService,
};

/// Role allowed on the admin routes
pub const ADMIN_ROLE: &str = "admin";

/// Retrieves the session user from the database, if any
///
/// # Returns
/// - `Ok(Some(UserModel))`: User in session and found in the database
/// - `Ok(None)`: No user in session, or the session pointed at a deleted user (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_optional_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<Option<UserModel>, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Ok(None);
    };

    let user = UserService::new(&state.db, &state.query_cache)
        .get_user(user_id)
        .await?;

    if user.is_none() {
        session.clear().await;

        tracing::warn!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );
    }

    Ok(user)
}

/// Retrieves user information from session and then from database
///
/// # Returns
/// - `Ok(UserModel)`: User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID exists in session but not found in database (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(state: &AppState, session: &Session) -> Result<UserModel, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    match get_optional_user_from_session(state, session).await? {
        Some(user) => Ok(user),
        None => Err(Error::AuthError(AuthError::UserNotInDatabase(user_id))),
    }
}

/// Retrieves the session user and requires the admin role
///
/// # Returns
/// - `Ok(UserModel)`: Admin user found
/// - `Err(Error::AuthError(AuthError::Forbidden))`: User is logged in without the admin role
/// - Any error of [`get_user_from_session`]
pub async fn get_admin_from_session(
    state: &AppState,
    session: &Session,
) -> Result<UserModel, Error> {
    let user = get_user_from_session(state, session).await?;

    if user.role != ADMIN_ROLE {
        return Err(Error::AuthError(AuthError::Forbidden(user.id)));
    }

    Ok(user)
}
