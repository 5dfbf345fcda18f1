use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod services;
pub mod tutors;

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
