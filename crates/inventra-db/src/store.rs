//! Store traits.
//!
//! Each method is a single store operation. Handlers never compose
//! read-then-write sequences for uniqueness; conflicts surface from the write
//! itself as [`StoreError::Conflict`].

use async_trait::async_trait;

use inventra_models::{
    Asset, AssetChanges, AssetId, NewAsset, NewUser, UserChanges, UserId, UserRecord,
};

use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;

    async fn find_user_by_username(&self, username: &str)
    -> Result<Option<UserRecord>, StoreError>;

    /// True if any user already holds `username` or `email`.
    async fn credential_exists(&self, username: &str, email: &str) -> Result<bool, StoreError>;

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Applies `changes`; `None` when no user has `id`.
    async fn update_user(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Inserts `user` unless its username or email is taken.
    ///
    /// Returns whether a row was inserted. Never reports a conflict.
    async fn insert_user_if_absent(&self, user: NewUser) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// All assets, newest first.
    async fn list_assets(&self) -> Result<Vec<Asset>, StoreError>;

    async fn find_asset(&self, id: AssetId) -> Result<Option<Asset>, StoreError>;

    async fn insert_asset(&self, asset: NewAsset) -> Result<Asset, StoreError>;

    /// Applies `changes` and bumps `updated_at`; `None` when no asset has `id`.
    async fn update_asset(
        &self,
        id: AssetId,
        changes: AssetChanges,
    ) -> Result<Option<Asset>, StoreError>;

    /// Returns whether an asset was removed.
    async fn delete_asset(&self, id: AssetId) -> Result<bool, StoreError>;

    /// Case-insensitive literal substring match over name, department, make,
    /// model and serial number. Newest first.
    async fn search_assets(&self, query: &str) -> Result<Vec<Asset>, StoreError>;
}

/// Everything the HTTP layer needs from persistence.
pub trait Store: UserStore + AssetStore {}

impl<T: UserStore + AssetStore> Store for T {}
