pub mod handlers;
pub mod layout;
pub mod pdf;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
