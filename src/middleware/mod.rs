//! Request authentication and authorization.
//!
//! - [`auth`]: bearer-token authentication (`AuthUser` extractor and the
//!   `require_auth` layer)
//! - [`role`]: role and ownership policies applied after authentication
//!
//! # Flow
//!
//! 1. `require_auth` (or the `AuthUser` extractor) reads
//!    `Authorization: Bearer <token>`. No bearer credential is a 401.
//! 2. The token is verified; a bad signature or expired token is a 403.
//! 3. The resolved identity is stored in the request extensions.
//! 4. Admin-only handlers take [`role::RequireAdmin`]; self-or-admin handlers
//!   take [`role::RequireSelfOrAdmin`]. Both reject with 403.
//!
//! All of this runs before the request body is read, so a caller without the
//! right role is refused before any validation happens.

pub mod auth;
pub mod role;
