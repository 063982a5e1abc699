use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::state::AppState;

use super::repo::{self, UserProfile};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile/:user_id", get(get_profile))
        .route("/profile/:user_id", put(put_profile))
}

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub goal: Option<String>,
    pub diet: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub daily_calorie_target: Option<i32>,
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    let profile = repo::get(&state.db, user_id)
        .await
        .map_err(internal)?
        .unwrap_or_else(|| UserProfile::empty(user_id));
    Ok(Json(profile))
}

#[instrument(skip(state, body))]
pub async fn put_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ProfileBody>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    let profile = UserProfile {
        user_id,
        goal: body.goal,
        diet: body.diet,
        allergies: body.allergies,
        daily_calorie_target: body.daily_calorie_target,
    };
    repo::upsert(&state.db, &profile).await.map_err(internal)?;
    Ok(Json(profile))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
