use crate::{
    errors::AppError,
    repositories::{
        rooms::{MemoryRoomStore, RoomStore},
        sessions::{MemorySessionStore, SessionStore},
        users::{MemoryUserStore, UserStore},
    },
    structs::users::User,
};
use std::sync::Arc;

/// Shared handle to the three stores. Handlers only see the trait objects, so
/// a persistent backend can replace the in-memory ones wholesale.
#[derive(Clone)]
pub struct AppState {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    rooms: Arc<dyn RoomStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_stores(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemorySessionStore::new()),
            Arc::new(MemoryRoomStore::new()),
        )
    }

    pub fn with_stores(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        rooms: Arc<dyn RoomStore>,
    ) -> Self {
        Self {
            users,
            sessions,
            rooms,
        }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    pub fn rooms(&self) -> &dyn RoomStore {
        self.rooms.as_ref()
    }

    /// Resolves a session token to its owning user. `NotFound` when the token
    /// is unknown. Production code and tests both go through this.
    pub async fn find_user_by_session(&self, session_id: &str) -> Result<User, AppError> {
        let user_id = self.sessions.resolve(session_id).await?;
        self.users.find_by_id(&user_id).await
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
