mod root;
mod rooms;
mod users;

use crate::{errors::AppError, state::AppState};
use axum::{
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::index))
        .route("/users", post(users::register))
        .route("/users/login", put(users::login).delete(users::logout))
        .route(
            "/users/{user_id}",
            get(users::get_user).put(users::update_user),
        )
        .route("/rooms", post(rooms::create_room).get(rooms::list_rooms))
        .route("/rooms/{room_id}", get(rooms::get_room))
        .route("/rooms/{room_id}/members", get(rooms::list_members))
        .route(
            "/rooms/{room_id}/members/{user_id}",
            put(rooms::add_member).delete(rooms::remove_member),
        )
        .fallback(handler_404)
        .method_not_allowed_fallback(handler_405)
        .layer(TraceLayer::new_for_http())
        .layer(
            // the browser client posts JSON and sends the session header
            // cross-origin, so both must be allowed explicitly
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_origin(Any)
                .allow_headers([
                    CONTENT_TYPE,
                    HeaderName::from_static(crate::auth::SESSION_ID_HEADER),
                ]),
        )
        .with_state(state)
}

// a matched path with an unsupported verb is 405, never a bare 404
async fn handler_405() -> AppError {
    AppError::MethodNotAllowed
}

async fn handler_404() -> AppError {
    AppError::NotFound("no such resource".to_string())
}
