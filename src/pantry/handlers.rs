use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::state::AppState;

use super::dto::{NewPantryItemBody, ReconcileResponse};
use super::repo::{self, PantryItem, ShoppingListItem};
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pantry/reconcile/:user_id", post(reconcile_pantry))
        .route("/pantry/:user_id", get(list_pantry).post(add_pantry_item))
        .route("/shopping-list/:user_id", get(list_shopping))
}

#[instrument(skip(state))]
pub async fn reconcile_pantry(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ReconcileResponse>, (StatusCode, String)> {
    let outcome = services::run_reconciliation(&state.db, state.nutrition.as_ref(), user_id)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "pantry reconciliation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    let message = outcome.message();
    Ok(Json(ReconcileResponse { outcome, message }))
}

#[instrument(skip(state))]
pub async fn list_pantry(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PantryItem>>, (StatusCode, String)> {
    let items = repo::list_pantry(&state.db, user_id).await.map_err(internal)?;
    Ok(Json(items))
}

#[instrument(skip(state, body))]
pub async fn add_pantry_item(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<NewPantryItemBody>,
) -> Result<(StatusCode, Json<PantryItem>), (StatusCode, String)> {
    if body.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".into()));
    }
    let item = repo::insert_pantry_item(
        &state.db,
        user_id,
        body.name.trim(),
        body.quantity,
        body.category.as_deref(),
    )
    .await
    .map_err(internal)?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state))]
pub async fn list_shopping(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ShoppingListItem>>, (StatusCode, String)> {
    let items = repo::list_shopping(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(items))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
