use crate::{errors::AppError, structs::sessions::Session};
use async_trait::async_trait;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashMap;
use tokio::sync::RwLock;

const TOKEN_LEN: usize = 32;

/// Maps opaque session tokens to user ids. Logins add tokens, logout removes
/// them; nothing here ever touches the user records themselves.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issues a fresh token. Other live sessions for the same user stay valid.
    async fn create(&self, user_id: &str) -> Result<String, AppError>;

    /// Fails with `NotFound` for unknown or already removed tokens.
    async fn resolve(&self, session_id: &str) -> Result<String, AppError>;

    /// Idempotent: removing an absent or invalid token is still success.
    async fn remove(&self, session_id: &str) -> Result<(), AppError>;
}

#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn random_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: &str) -> Result<String, AppError> {
        let mut sessions = self.inner.write().await;
        let token = loop {
            let candidate = random_token();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(
            token.clone(),
            Session {
                user_id: user_id.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(token)
    }

    async fn resolve(&self, session_id: &str) -> Result<String, AppError> {
        self.inner
            .read()
            .await
            .get(session_id)
            .map(|session| session.user_id.clone())
            .ok_or_else(|| AppError::NotFound("unknown session id".to_string()))
    }

    async fn remove(&self, session_id: &str) -> Result<(), AppError> {
        self.inner.write().await.remove(session_id);
        Ok(())
    }
}
