use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stored room record. The creator is tracked on the side and is not part of
/// the member set.
#[derive(Clone, Debug)]
pub struct Room {
    pub id: String,
    pub creator_id: String,
    pub members: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

/// A user reference embedded in room responses. `nickname` only shows up
/// when a profile flag asked for it.
#[derive(Serialize, Debug)]
pub struct UserSummary {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Serialize)]
pub struct RoomDetail {
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub creator: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<UserSummary>>,
}

#[derive(Serialize)]
pub struct RoomListResponse {
    pub rooms: Vec<RoomDetail>,
}

#[derive(Serialize)]
pub struct MemberListResponse {
    pub members: Vec<UserSummary>,
}

/// Query flags on GET /rooms/{roomId} controlling the response shape.
#[derive(Deserialize, Default)]
pub struct RoomShapeParams {
    #[serde(rename = "creator-profile")]
    pub creator_profile: Option<String>,
    pub members: Option<String>,
    #[serde(rename = "member-profile")]
    pub member_profile: Option<String>,
}

impl RoomShapeParams {
    pub fn wants_creator_profile(&self) -> bool {
        flag_set(&self.creator_profile)
    }

    pub fn wants_members(&self) -> bool {
        flag_set(&self.members)
    }

    pub fn wants_member_profile(&self) -> bool {
        flag_set(&self.member_profile)
    }
}

// Presence counts as true unless the value spells out a negative, so both
// `?members` and `?members=True` work.
fn flag_set(value: &Option<String>) -> bool {
    match value {
        Some(v) => !v.eq_ignore_ascii_case("false") && v != "0",
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_off() {
        let params = RoomShapeParams::default();
        assert!(!params.wants_creator_profile());
        assert!(!params.wants_members());
        assert!(!params.wants_member_profile());
    }

    #[test]
    fn flag_values_are_lenient() {
        assert!(flag_set(&Some("True".to_string())));
        assert!(flag_set(&Some("true".to_string())));
        assert!(flag_set(&Some("1".to_string())));
        assert!(flag_set(&Some(String::new())));
        assert!(!flag_set(&Some("false".to_string())));
        assert!(!flag_set(&Some("0".to_string())));
        assert!(!flag_set(&None));
    }
}
