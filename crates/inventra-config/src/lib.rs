//! # Inventra Config
//!
//! Configuration types for the Inventra API, loaded from environment variables:
//!
//! - [`server`]: bind address
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: token signing secret and lifetime
//! - [`password`]: bcrypt work factor
//! - [`cors`]: allowed browser origins
//! - [`admin`]: the well-known admin account reconciled at startup
//! - [`observability`]: logging and metrics switches
//!
//! # Example
//!
//! ```ignore
//! use inventra_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

use std::env;
use std::str::FromStr;

pub mod admin;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod observability;
pub mod password;
pub mod server;

// Re-export commonly used types at crate root
pub use admin::AdminConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use observability::ObservabilityConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

/// Reads `key` and parses it, falling back to `default` when unset or unparsable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
