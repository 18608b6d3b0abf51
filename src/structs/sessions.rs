use chrono::{DateTime, Utc};

/// Stored session record, keyed by the opaque token handed to the client.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
