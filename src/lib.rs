pub mod auth;
pub mod errors;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod structs;
