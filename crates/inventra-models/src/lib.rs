//! # Inventra Models
//!
//! Domain entities shared by the stores and the HTTP layer.
//!
//! - [`ids`]: strongly-typed UUID identifiers
//! - [`users`]: user accounts, roles and the stored credential record
//! - [`assets`]: inventory assets (the API's "products")
//!
//! Request DTOs live next to their handlers in the server crate; the types
//! here are what the stores read and write.

pub mod assets;
pub mod ids;
pub mod users;

pub use assets::{Asset, AssetChanges, AssetStatus, NewAsset, parse_issue_date};
pub use ids::{AssetId, UserId};
pub use users::{NewUser, User, UserChanges, UserRecord, UserRole};
