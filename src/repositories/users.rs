use crate::{errors::AppError, structs::users::User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Owns the user records. A real persistence backend slots in behind this
/// trait without touching the routes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the username is already taken.
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        nickname: Option<String>,
    ) -> Result<User, AppError>;

    async fn find_by_id(&self, user_id: &str) -> Result<User, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<User, AppError>;

    /// Partial update; `None` fields keep their current value.
    async fn update(
        &self,
        user_id: &str,
        nickname: Option<String>,
        password_hash: Option<String>,
    ) -> Result<User, AppError>;
}

#[derive(Default)]
struct UserTable {
    by_id: HashMap<String, User>,
    // username -> user id, kept in lockstep with by_id
    by_username: HashMap<String, String>,
}

#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<UserTable>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        nickname: Option<String>,
    ) -> Result<User, AppError> {
        // uniqueness check and insert share one write lock
        let mut table = self.inner.write().await;
        if table.by_username.contains_key(username) {
            return Err(AppError::Conflict(format!(
                "username {username} is already taken"
            )));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            nickname,
            created_at: Utc::now(),
        };
        table
            .by_username
            .insert(user.username.clone(), user.id.clone());
        table.by_id.insert(user.id.clone(), user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<User, AppError> {
        self.inner
            .read()
            .await
            .by_id
            .get(user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("no user with id {user_id}")))
    }

    async fn find_by_username(&self, username: &str) -> Result<User, AppError> {
        let table = self.inner.read().await;
        table
            .by_username
            .get(username)
            .and_then(|id| table.by_id.get(id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("no user named {username}")))
    }

    async fn update(
        &self,
        user_id: &str,
        nickname: Option<String>,
        password_hash: Option<String>,
    ) -> Result<User, AppError> {
        let mut table = self.inner.write().await;
        let user = table
            .by_id
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("no user with id {user_id}")))?;

        if let Some(nickname) = nickname {
            user.nickname = Some(nickname);
        }
        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }

        Ok(user.clone())
    }
}
