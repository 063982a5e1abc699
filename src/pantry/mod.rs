pub mod dto;
pub mod extract;
pub mod handlers;
pub mod reconcile;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
