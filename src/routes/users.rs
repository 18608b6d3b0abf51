use crate::{
    auth::{self, SessionUser},
    errors::AppError,
    state::AppState,
    structs::users::{
        LoginInput, LoginResponse, RegisterInput, RegisterResponse, UpdateUserInput, UserProfile,
    },
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

/// POST /users — register and log the new user in.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if input.username.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "username and password must not be empty".to_string(),
        ));
    }

    let password_hash = auth::hash_password(&input.password)?;
    let user = state
        .users()
        .create(&input.username, &password_hash, input.nickname)
        .await?;
    let session_id = state.sessions().create(&user.id).await?;

    tracing::debug!(user_id = %user.id, "registered user {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            session_id,
            username: user.username,
            nickname: user.nickname,
        }),
    ))
}

/// PUT /users/login — issue a fresh session token. Prior tokens stay live.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    // one shared message so the response doesn't reveal which half failed
    let bad_credentials = || AppError::Unauthorized("invalid username or password".to_string());

    let user = state
        .users()
        .find_by_username(&input.username)
        .await
        .map_err(|_| bad_credentials())?;
    if !auth::verify_password(&input.password, &user.password_hash)? {
        return Err(bad_credentials());
    }

    let session_id = state.sessions().create(&user.id).await?;

    Ok(Json(LoginResponse {
        user_id: user.id,
        session_id,
    }))
}

/// DELETE /users/login — idempotent logout. An absent or invalid token is
/// still success, and the user record is untouched.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    if let Some(session_id) = headers
        .get(auth::SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        state.sessions().remove(session_id).await?;
    }
    Ok(Json(json!({})))
}

/// GET /users/{userId}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let user = state.users().find_by_id(&user_id).await?;
    Ok(Json(UserProfile::from(&user)))
}

/// PUT /users/{userId} — partial profile update, owner only.
pub async fn update_user(
    State(state): State<AppState>,
    SessionUser(caller): SessionUser,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserInput>, JsonRejection>,
) -> Result<Json<UserProfile>, AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if caller.id != user_id {
        return Err(AppError::Unauthorized(
            "profile updates are limited to the owning user".to_string(),
        ));
    }

    let password_hash = match input.password.as_deref() {
        Some(password) if password.is_empty() => {
            return Err(AppError::BadRequest("password must not be empty".to_string()))
        }
        Some(password) => Some(auth::hash_password(password)?),
        None => None,
    };

    let user = state
        .users()
        .update(&user_id, input.nickname, password_hash)
        .await?;
    Ok(Json(UserProfile::from(&user)))
}
