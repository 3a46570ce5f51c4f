use crate::env_string_or;

/// Credentials of the account created on first start when no `admin` user exists.
#[derive(Clone)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            username: env_string_or("ADMIN_USERNAME", "admin"),
            email: env_string_or("ADMIN_EMAIL", "admin@inventory.com"),
            password: env_string_or("ADMIN_PASSWORD", "admin123"),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
