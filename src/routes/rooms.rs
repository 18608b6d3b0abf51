use crate::{
    auth::SessionUser,
    errors::AppError,
    state::AppState,
    structs::rooms::{
        MemberListResponse, Room, RoomDetail, RoomListResponse, RoomShapeParams, UserSummary,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// POST /rooms — the authenticated caller becomes the creator. The creator is
/// associated with the room without being enumerated in its member set.
pub async fn create_room(
    State(state): State<AppState>,
    SessionUser(creator): SessionUser,
) -> Result<impl IntoResponse, AppError> {
    let room = state.rooms().create(&creator.id).await?;

    tracing::debug!(room_id = %room.id, creator = %creator.id, "room created");

    Ok((
        StatusCode::CREATED,
        Json(RoomDetail {
            room_id: room.id,
            creator: UserSummary {
                user_id: creator.id,
                nickname: creator.nickname,
            },
            members: None,
        }),
    ))
}

/// GET /rooms — every room in its default shape, so a listing entry matches
/// the unflagged GET /rooms/{roomId} body.
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<RoomListResponse>, AppError> {
    let mut rooms = Vec::new();
    for room in state.rooms().list().await? {
        rooms.push(room_detail(&state, &room, &RoomShapeParams::default()).await?);
    }
    Ok(Json(RoomListResponse { rooms }))
}

/// GET /rooms/{roomId} — query flags pick the response shape.
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Query(params): Query<RoomShapeParams>,
) -> Result<Json<RoomDetail>, AppError> {
    let room = state.rooms().get(&room_id).await?;
    Ok(Json(room_detail(&state, &room, &params).await?))
}

/// GET /rooms/{roomId}/members — bare member id list.
pub async fn list_members(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<MemberListResponse>, AppError> {
    let room = state.rooms().get(&room_id).await?;
    Ok(Json(MemberListResponse {
        members: member_ids(&room),
    }))
}

/// PUT /rooms/{roomId}/members/{userId} — idempotent add.
pub async fn add_member(
    State(state): State<AppState>,
    SessionUser(_caller): SessionUser,
    Path((room_id, user_id)): Path<(String, String)>,
) -> Result<Json<RoomDetail>, AppError> {
    // the member must be a known user; the room check happens in the store
    state.users().find_by_id(&user_id).await?;
    let room = state.rooms().add_member(&room_id, &user_id).await?;
    Ok(Json(membership_view(&room)))
}

/// DELETE /rooms/{roomId}/members/{userId} — idempotent remove.
pub async fn remove_member(
    State(state): State<AppState>,
    SessionUser(_caller): SessionUser,
    Path((room_id, user_id)): Path<(String, String)>,
) -> Result<Json<RoomDetail>, AppError> {
    let room = state.rooms().remove_member(&room_id, &user_id).await?;
    Ok(Json(membership_view(&room)))
}

async fn room_detail(
    state: &AppState,
    room: &Room,
    params: &RoomShapeParams,
) -> Result<RoomDetail, AppError> {
    let creator = if params.wants_creator_profile() {
        let user = state.users().find_by_id(&room.creator_id).await?;
        UserSummary {
            user_id: user.id,
            nickname: user.nickname,
        }
    } else {
        UserSummary {
            user_id: room.creator_id.clone(),
            nickname: None,
        }
    };

    let members = if params.wants_member_profile() {
        let mut members = Vec::new();
        for member_id in &room.members {
            let user = state.users().find_by_id(member_id).await?;
            members.push(UserSummary {
                user_id: user.id,
                nickname: user.nickname,
            });
        }
        Some(members)
    } else if params.wants_members() {
        Some(member_ids(room))
    } else {
        None
    };

    Ok(RoomDetail {
        room_id: room.id.clone(),
        creator,
        members,
    })
}

fn member_ids(room: &Room) -> Vec<UserSummary> {
    room.members
        .iter()
        .map(|member_id| UserSummary {
            user_id: member_id.clone(),
            nickname: None,
        })
        .collect()
}

fn membership_view(room: &Room) -> RoomDetail {
    RoomDetail {
        room_id: room.id.clone(),
        creator: UserSummary {
            user_id: room.creator_id.clone(),
            nickname: None,
        },
        members: Some(member_ids(room)),
    }
}
