use crate::{
    errors::{internal_error, AppError},
    state::AppState,
    structs::users::User,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use bcrypt::{hash, verify, DEFAULT_COST};

/// Request header carrying the session token.
pub const SESSION_ID_HEADER: &str = "x-snake-session-id";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(internal_error)
}

/// Exact comparison against the stored hash; callers must not trim the input.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash).map_err(internal_error)
}

/// The acting identity, resolved from the session header. Appears explicitly
/// in the signature of every handler that needs a caller.
pub struct SessionUser(pub User);

pub fn session_id_from_parts(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id = session_id_from_parts(parts).ok_or_else(|| {
            AppError::Unauthorized(format!("missing {SESSION_ID_HEADER} header"))
        })?;

        let user = state
            .find_user_by_session(session_id)
            .await
            .map_err(|_| AppError::Unauthorized("invalid session id".to_string()))?;

        Ok(SessionUser(user))
    }
}
