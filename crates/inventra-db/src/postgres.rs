//! PostgreSQL store.
//!
//! Unique constraints are declared in the migrations with the names
//! [`UniqueConstraint`](crate::UniqueConstraint) recognises, so a violated
//! write converts straight into [`StoreError::Conflict`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};

use inventra_core::PasswordHash;
use inventra_models::{
    Asset, AssetChanges, AssetId, NewAsset, NewUser, UserChanges, UserId, UserRecord, UserRole,
};

use crate::error::StoreError;
use crate::store::{AssetStore, UserStore};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at, updated_at";

const ASSET_COLUMNS: &str = "id, first_name, last_name, staff_id, designation, department, \
     location, block, room_number, make, model, serial_number, capacity_va, issue_date, status, \
     created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(FromRow)]
struct UserRow {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
    role: UserRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            password_hash: PasswordHash::from_stored(row.password_hash),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Escapes LIKE metacharacters so the query matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn credential_exists(&self, username: &str, email: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self, user), fields(user.username = %user.username, db.operation = "INSERT", db.table = "users"))]
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.password_hash.as_str())
        .bind(user.role)
        .fetch_one(&self.pool)
        .await?;

        debug!(user.id = %row.id, "User inserted");
        Ok(row.into())
    }

    #[instrument(skip(self, changes), fields(db.operation = "UPDATE", db.table = "users"))]
    async fn update_user(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users
             SET email = COALESCE($2, email),
                 password_hash = COALESCE($3, password_hash),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.email)
        .bind(changes.password_hash.as_ref().map(|hash| hash.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    #[instrument(skip(self, user), fields(user.username = %user.username, db.operation = "INSERT", db.table = "users"))]
    async fn insert_user_if_absent(&self, user: NewUser) -> Result<bool, StoreError> {
        let inserted = sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT DO NOTHING
             RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.password_hash.as_str())
        .bind(user.role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted.is_some())
    }
}

#[async_trait]
impl AssetStore for PgStore {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "assets"))]
    async fn list_assets(&self) -> Result<Vec<Asset>, StoreError> {
        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = assets.len(), "Fetched assets");
        Ok(assets)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "assets"))]
    async fn find_asset(&self, id: AssetId) -> Result<Option<Asset>, StoreError> {
        let asset = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asset)
    }

    #[instrument(skip(self, asset), fields(asset.serial_number = %asset.serial_number, db.operation = "INSERT", db.table = "assets"))]
    async fn insert_asset(&self, asset: NewAsset) -> Result<Asset, StoreError> {
        let asset = sqlx::query_as::<_, Asset>(&format!(
            "INSERT INTO assets (first_name, last_name, staff_id, designation, department,
                                 location, block, room_number, make, model, serial_number,
                                 capacity_va, issue_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {ASSET_COLUMNS}"
        ))
        .bind(asset.first_name)
        .bind(asset.last_name)
        .bind(asset.staff_id)
        .bind(asset.designation)
        .bind(asset.department)
        .bind(asset.location)
        .bind(asset.block)
        .bind(asset.room_number)
        .bind(asset.make)
        .bind(asset.model)
        .bind(asset.serial_number)
        .bind(asset.capacity_va)
        .bind(asset.issue_date)
        .bind(asset.status)
        .fetch_one(&self.pool)
        .await?;

        debug!(asset.id = %asset.id, "Asset inserted");
        Ok(asset)
    }

    #[instrument(skip(self, changes), fields(db.operation = "UPDATE", db.table = "assets"))]
    async fn update_asset(
        &self,
        id: AssetId,
        changes: AssetChanges,
    ) -> Result<Option<Asset>, StoreError> {
        let asset = sqlx::query_as::<_, Asset>(&format!(
            "UPDATE assets
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 staff_id = COALESCE($4, staff_id),
                 designation = COALESCE($5, designation),
                 department = COALESCE($6, department),
                 location = COALESCE($7, location),
                 block = COALESCE($8, block),
                 room_number = COALESCE($9, room_number),
                 make = COALESCE($10, make),
                 model = COALESCE($11, model),
                 serial_number = COALESCE($12, serial_number),
                 capacity_va = COALESCE($13, capacity_va),
                 issue_date = COALESCE($14, issue_date),
                 status = COALESCE($15, status),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {ASSET_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.staff_id)
        .bind(changes.designation)
        .bind(changes.department)
        .bind(changes.location)
        .bind(changes.block)
        .bind(changes.room_number)
        .bind(changes.make)
        .bind(changes.model)
        .bind(changes.serial_number)
        .bind(changes.capacity_va)
        .bind(changes.issue_date)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asset)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "assets"))]
    async fn delete_asset(&self, id: AssetId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "assets"))]
    async fn search_assets(&self, query: &str) -> Result<Vec<Asset>, StoreError> {
        let pattern = format!("%{}%", escape_like(query));

        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets
             WHERE first_name ILIKE $1
                OR last_name ILIKE $1
                OR department ILIKE $1
                OR make ILIKE $1
                OR model ILIKE $1
                OR serial_number ILIKE $1
             ORDER BY created_at DESC"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = assets.len(), "Search matched assets");
        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ups"), "ups");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
    }
}
