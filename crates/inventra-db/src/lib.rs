//! # Inventra DB
//!
//! Persistence for users and assets.
//!
//! Handlers talk to an `Arc<dyn Store>`; two backends implement it:
//!
//! - [`PgStore`]: PostgreSQL through sqlx, used by the server and CLI
//! - [`MemoryStore`]: a `parking_lot::RwLock`-guarded in-process store used by
//!   the test suite
//!
//! Both enforce the same uniqueness rules and report violations as
//! [`StoreError::Conflict`] naming the violated [`UniqueConstraint`].
//!
//! # Example
//!
//! ```ignore
//! use inventra_config::DatabaseConfig;
//! use inventra_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use error::{StoreError, UniqueConstraint};
pub use memory::MemoryStore;
pub use pool::{init_db_pool, run_migrations};
pub use postgres::PgStore;
pub use store::{AssetStore, Store, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;
