use crate::{env_or, env_string_or};

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env_string_or("JWT_SECRET", "your-secret-key-change-in-production"),
            token_expiry: env_or("JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY_SECS),
        }
    }
}
