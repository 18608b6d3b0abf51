pub mod rooms;
pub mod sessions;
pub mod users;
