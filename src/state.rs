use std::sync::Arc;

use inventra_config::{CorsConfig, JwtConfig, PasswordConfig};
use inventra_db::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn from_env(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            jwt_config: JwtConfig::from_env(),
            password_config: PasswordConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("password_config", &self.password_config)
            .finish_non_exhaustive()
    }
}
