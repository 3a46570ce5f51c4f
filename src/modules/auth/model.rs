use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use inventra_core::serde::{deserialize_trimmed, deserialize_trimmed_opt};
use inventra_models::User;

use crate::validator::valid_role;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Surrounding whitespace is removed before validation.
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "alice")]
    pub username: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "Please enter a valid email"))]
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Defaults to `user`.
    #[validate(custom(function = "valid_role", message = "Role must be either user or admin"))]
    #[schema(example = "user")]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_opt")]
    #[validate(email(message = "Please enter a valid email"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// Returned by register and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: User,
}
