//! In-memory store.
//!
//! Holds users and assets behind a single [`parking_lot::RwLock`], so every
//! uniqueness check and the write it guards happen under one write lock. It
//! enforces the same unique constraints as the Postgres schema.
//!
//! Data is not persisted; everything is lost when the store is dropped.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use inventra_models::{
    Asset, AssetChanges, AssetId, NewAsset, NewUser, UserChanges, UserId, UserRecord,
};

use crate::error::{StoreError, UniqueConstraint};
use crate::store::{AssetStore, UserStore};

#[derive(Default)]
struct State {
    users: HashMap<UserId, UserRecord>,
    /// Insertion order; later entries are newer.
    assets: Vec<Asset>,
}

impl State {
    fn user_conflict(&self, username: &str, email: &str) -> Option<UniqueConstraint> {
        self.users.values().find_map(|user| {
            if user.username == username {
                Some(UniqueConstraint::Username)
            } else if user.email == email {
                Some(UniqueConstraint::Email)
            } else {
                None
            }
        })
    }

    fn asset_conflict(
        &self,
        staff_id: i64,
        serial_number: &str,
        exclude: Option<AssetId>,
    ) -> Option<UniqueConstraint> {
        self.assets
            .iter()
            .filter(|asset| Some(asset.id) != exclude)
            .find_map(|asset| {
                if asset.staff_id == staff_id {
                    Some(UniqueConstraint::StaffId)
                } else if asset.serial_number == serial_number {
                    Some(UniqueConstraint::SerialNumber)
                } else {
                    None
                }
            })
    }

    fn newest_first<'a>(assets: impl DoubleEndedIterator<Item = &'a Asset>) -> Vec<Asset> {
        let mut out: Vec<Asset> = assets.rev().cloned().collect();
        // stable: equal timestamps keep reverse insertion order
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.state.read().users.len()
    }

    pub fn asset_count(&self) -> usize {
        self.state.read().assets.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn credential_exists(&self, username: &str, email: &str) -> Result<bool, StoreError> {
        Ok(self.state.read().user_conflict(username, email).is_some())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut state = self.state.write();
        if let Some(constraint) = state.user_conflict(&user.username, &user.email) {
            return Err(StoreError::Conflict(constraint));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: UserId::new(),
            username: user.username,
            email: user.email,
            role: user.role,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_user(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut state = self.state.write();

        if let Some(email) = &changes.email
            && state
                .users
                .values()
                .any(|user| user.id != id && &user.email == email)
        {
            return Err(StoreError::Conflict(UniqueConstraint::Email));
        }

        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn insert_user_if_absent(&self, user: NewUser) -> Result<bool, StoreError> {
        match self.insert_user(user).await {
            Ok(_) => Ok(true),
            Err(StoreError::Conflict(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn list_assets(&self) -> Result<Vec<Asset>, StoreError> {
        Ok(State::newest_first(self.state.read().assets.iter()))
    }

    async fn find_asset(&self, id: AssetId) -> Result<Option<Asset>, StoreError> {
        Ok(self
            .state
            .read()
            .assets
            .iter()
            .find(|asset| asset.id == id)
            .cloned())
    }

    async fn insert_asset(&self, asset: NewAsset) -> Result<Asset, StoreError> {
        let mut state = self.state.write();
        if let Some(constraint) = state.asset_conflict(asset.staff_id, &asset.serial_number, None)
        {
            return Err(StoreError::Conflict(constraint));
        }

        let now = Utc::now();
        let asset = Asset {
            id: AssetId::new(),
            first_name: asset.first_name,
            last_name: asset.last_name,
            staff_id: asset.staff_id,
            designation: asset.designation,
            department: asset.department,
            location: asset.location,
            block: asset.block,
            room_number: asset.room_number,
            make: asset.make,
            model: asset.model,
            serial_number: asset.serial_number,
            capacity_va: asset.capacity_va,
            issue_date: asset.issue_date,
            status: asset.status,
            created_at: now,
            updated_at: now,
        };
        state.assets.push(asset.clone());
        Ok(asset)
    }

    async fn update_asset(
        &self,
        id: AssetId,
        changes: AssetChanges,
    ) -> Result<Option<Asset>, StoreError> {
        let mut state = self.state.write();
        let Some(index) = state.assets.iter().position(|asset| asset.id == id) else {
            return Ok(None);
        };

        let mut updated = state.assets[index].clone();
        changes.apply_to(&mut updated);
        if let Some(constraint) =
            state.asset_conflict(updated.staff_id, &updated.serial_number, Some(id))
        {
            return Err(StoreError::Conflict(constraint));
        }

        updated.updated_at = Utc::now();
        state.assets[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_asset(&self, id: AssetId) -> Result<bool, StoreError> {
        let mut state = self.state.write();
        let before = state.assets.len();
        state.assets.retain(|asset| asset.id != id);
        Ok(state.assets.len() < before)
    }

    async fn search_assets(&self, query: &str) -> Result<Vec<Asset>, StoreError> {
        let needle = query.to_lowercase();
        let state = self.state.read();
        Ok(State::newest_first(
            state
                .assets
                .iter()
                .filter(|asset| asset.matches_query(&needle)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventra_core::PasswordHash;
    use inventra_models::{AssetStatus, UserRole};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: PasswordHash::from_stored("$2b$04$stored"),
            role: UserRole::User,
        }
    }

    fn new_asset(staff_id: i64, serial: &str, model: &str) -> NewAsset {
        NewAsset {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            staff_id,
            designation: "Engineer".to_string(),
            department: "IT".to_string(),
            location: "HQ".to_string(),
            block: "A".to_string(),
            room_number: "101".to_string(),
            make: "APC".to_string(),
            model: model.to_string(),
            serial_number: serial.to_string(),
            capacity_va: "1500".to_string(),
            issue_date: Utc::now(),
            status: AssetStatus::Functional,
        }
    }

    #[tokio::test]
    async fn test_insert_user_rejects_duplicate_username() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com")).await.unwrap();

        let err = store
            .insert_user(new_user("alice", "other@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(UniqueConstraint::Username)));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_insert_user_if_absent_is_idempotent() {
        let store = MemoryStore::new();

        assert!(store.insert_user_if_absent(new_user("admin", "admin@x.com")).await.unwrap());
        assert!(!store.insert_user_if_absent(new_user("admin", "admin@x.com")).await.unwrap());
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_update_user_email_conflict() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com")).await.unwrap();
        let bob = store.insert_user(new_user("bob", "b@x.com")).await.unwrap();

        let err = store
            .update_user(
                bob.id,
                UserChanges {
                    email: Some("a@x.com".to_string()),
                    password_hash: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(UniqueConstraint::Email)));
    }

    #[tokio::test]
    async fn test_update_user_keeping_own_email() {
        let store = MemoryStore::new();
        let alice = store.insert_user(new_user("alice", "a@x.com")).await.unwrap();

        let updated = store
            .update_user(
                alice.id,
                UserChanges {
                    email: Some("a@x.com".to_string()),
                    password_hash: None,
                },
            )
            .await
            .unwrap();

        assert!(updated.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let store = MemoryStore::new();
        let result = store
            .update_user(UserId::new(), UserChanges::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_asset_uniqueness() {
        let store = MemoryStore::new();
        store.insert_asset(new_asset(1001, "SN-1", "X")).await.unwrap();

        let staff = store.insert_asset(new_asset(1001, "SN-2", "X")).await.unwrap_err();
        let serial = store.insert_asset(new_asset(1002, "SN-1", "X")).await.unwrap_err();

        assert!(matches!(staff, StoreError::Conflict(UniqueConstraint::StaffId)));
        assert!(matches!(serial, StoreError::Conflict(UniqueConstraint::SerialNumber)));
        assert_eq!(store.asset_count(), 1);
    }

    #[tokio::test]
    async fn test_update_asset_conflict_leaves_record_intact() {
        let store = MemoryStore::new();
        store.insert_asset(new_asset(1001, "SN-1", "X")).await.unwrap();
        let second = store.insert_asset(new_asset(1002, "SN-2", "X")).await.unwrap();

        let err = store
            .update_asset(
                second.id,
                AssetChanges {
                    staff_id: Some(1001),
                    make: Some("Eaton".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(UniqueConstraint::StaffId)));
        let stored = store.find_asset(second.id).await.unwrap().unwrap();
        assert_eq!(stored.staff_id, 1002);
        assert_eq!(stored.make, "APC");
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryStore::new();
        let first = store.insert_asset(new_asset(1, "SN-1", "X")).await.unwrap();
        let second = store.insert_asset(new_asset(2, "SN-2", "X")).await.unwrap();
        let third = store.insert_asset(new_asset(3, "SN-3", "X")).await.unwrap();

        let ids: Vec<AssetId> = store
            .list_assets()
            .await
            .unwrap()
            .into_iter()
            .map(|asset| asset.id)
            .collect();

        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_search_case_insensitive_substring() {
        let store = MemoryStore::new();
        store.insert_asset(new_asset(1, "SN-1", "Smart-UPS 1500")).await.unwrap();
        store.insert_asset(new_asset(2, "SN-2", "Back-UPS")).await.unwrap();

        let results = store.search_assets("SMART").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].model, "Smart-UPS 1500");
    }

    #[tokio::test]
    async fn test_delete_asset() {
        let store = MemoryStore::new();
        let asset = store.insert_asset(new_asset(1, "SN-1", "X")).await.unwrap();

        assert!(store.delete_asset(asset.id).await.unwrap());
        assert!(!store.delete_asset(asset.id).await.unwrap());
        assert!(store.find_asset(asset.id).await.unwrap().is_none());
    }
}
