use crate::{errors::AppError, structs::rooms::Room};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Owns the room records and their member sets.
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn create(&self, creator_id: &str) -> Result<Room, AppError>;

    /// Every room exactly once; ordering is stable across calls.
    async fn list(&self) -> Result<Vec<Room>, AppError>;

    async fn get(&self, room_id: &str) -> Result<Room, AppError>;

    /// Idempotent insert. Fails with `NotFound` when the room is absent.
    async fn add_member(&self, room_id: &str, user_id: &str) -> Result<Room, AppError>;

    /// Idempotent remove. Fails with `NotFound` when the room is absent.
    async fn remove_member(&self, room_id: &str, user_id: &str) -> Result<Room, AppError>;
}

// BTreeMap so listing order is deterministic without a separate index.
#[derive(Default)]
pub struct MemoryRoomStore {
    inner: RwLock<BTreeMap<String, Room>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn room_not_found(room_id: &str) -> AppError {
    AppError::NotFound(format!("no room with id {room_id}"))
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn create(&self, creator_id: &str) -> Result<Room, AppError> {
        let room = Room {
            id: Uuid::new_v4().to_string(),
            creator_id: creator_id.to_string(),
            members: BTreeSet::new(),
            created_at: Utc::now(),
        };
        self.inner
            .write()
            .await
            .insert(room.id.clone(), room.clone());
        Ok(room)
    }

    async fn list(&self) -> Result<Vec<Room>, AppError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }

    async fn get(&self, room_id: &str) -> Result<Room, AppError> {
        self.inner
            .read()
            .await
            .get(room_id)
            .cloned()
            .ok_or_else(|| room_not_found(room_id))
    }

    async fn add_member(&self, room_id: &str, user_id: &str) -> Result<Room, AppError> {
        let mut rooms = self.inner.write().await;
        let room = rooms.get_mut(room_id).ok_or_else(|| room_not_found(room_id))?;
        room.members.insert(user_id.to_string());
        Ok(room.clone())
    }

    async fn remove_member(&self, room_id: &str, user_id: &str) -> Result<Room, AppError> {
        let mut rooms = self.inner.write().await;
        let room = rooms.get_mut(room_id).ok_or_else(|| room_not_found(room_id))?;
        room.members.remove(user_id);
        Ok(room.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_rooms_have_unique_nonempty_ids() {
        let store = MemoryRoomStore::new();
        let a = store.create("alice").await.unwrap();
        let b = store.create("alice").await.unwrap();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn list_matches_created_set() {
        let store = MemoryRoomStore::new();
        let mut created: Vec<String> = Vec::new();
        for _ in 0..20 {
            created.push(store.create("alice").await.unwrap().id);
        }
        created.sort();

        let listed: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|room| room.id)
            .collect();
        assert_eq!(created, listed);
    }

    #[tokio::test]
    async fn membership_is_idempotent() {
        let store = MemoryRoomStore::new();
        let room = store.create("alice").await.unwrap();

        store.add_member(&room.id, "bob").await.unwrap();
        let after_second_add = store.add_member(&room.id, "bob").await.unwrap();
        assert_eq!(after_second_add.members.len(), 1);

        let after_remove = store.remove_member(&room.id, "bob").await.unwrap();
        assert!(after_remove.members.is_empty());
        // removing an absent member is still success
        store.remove_member(&room.id, "bob").await.unwrap();
    }

    #[tokio::test]
    async fn membership_on_missing_room_is_not_found() {
        let store = MemoryRoomStore::new();
        assert!(matches!(
            store.add_member("missing", "bob").await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            store.remove_member("missing", "bob").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn creator_is_not_enumerated_in_members() {
        let store = MemoryRoomStore::new();
        let room = store.create("alice").await.unwrap();
        assert!(room.members.is_empty());
        assert_eq!(room.creator_id, "alice");
    }
}
