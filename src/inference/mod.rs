use crate::state::AppState;
use axum::Router;

mod client;
mod dto;
pub mod gateway;
pub mod handlers;
pub mod model;
pub mod services;

pub use gateway::ModelSlot;

pub fn router() -> Router<AppState> {
    handlers::inference_routes()
}
