//! # Inventra Core
//!
//! Core types shared by every Inventra crate:
//!
//! - [`errors`]: the application error taxonomy and its HTTP response mapping
//! - [`password`]: plaintext/hashed password types and bcrypt hashing
//! - [`serde`]: custom deserialization helpers for request payloads
//!
//! # Example
//!
//! ```ignore
//! use inventra_core::{AppError, PlainPassword};
//!
//! let hash = PlainPassword::new("secret1").hash(12)?;
//! let err = AppError::NotFound("Product");
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, FieldError, MessageResponse};
pub use password::{PasswordHash, PlainPassword, hash_password, verify_password};
