use serde::{Deserialize, Serialize};

/// Registration request
///
/// Fields are optional so a missing field answers with a 400 validation error
/// instead of a body rejection.
#[derive(Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterDto {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginDto {
    pub email: Option<String>,
    pub password: Option<String>,
}
