//! # Inventra Auth
//!
//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying the user's identity and role. They are
//! stateless: the server keeps no session table and cannot revoke a token
//! before it expires.
//!
//! # Example
//!
//! ```ignore
//! use inventra_auth::{create_token, verify_token};
//! use inventra_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_token(&user, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_token, create_token_at, verify_token};
