use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::profile::repo::UserProfile;
use crate::state::AppState;
use crate::{plans, profile};

use super::dto::{
    AnalyzeIngredientsRequest, AnalyzeIngredientsResponse, ErrorBody, GeneratePlanResponse,
};
use super::services::{self, GenerateError};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals/generate-plan/:user_id", post(generate_plan))
        .route("/meals/analyze-ingredients", post(analyze_ingredients))
}

#[instrument(skip(state))]
pub async fn generate_plan(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<GeneratePlanResponse>, (StatusCode, Json<ErrorBody>)> {
    let profile = profile::repo::get(&state.db, user_id)
        .await
        .map_err(|e| persistence_err(user_id, e))?
        .unwrap_or_else(|| UserProfile::empty(user_id));

    let plan = services::generate_plan(state.completion.as_ref(), &profile)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "plan generation failed");
            let status = match e {
                GenerateError::Upstream(_) => StatusCode::BAD_GATEWAY,
                GenerateError::Parse(_) | GenerateError::Shape(_) => StatusCode::BAD_GATEWAY,
            };
            (status, Json(ErrorBody { error: e.to_string() }))
        })?;

    // Only a fully parsed, validated plan ever reaches the store.
    plans::repo::save(&state.db, user_id, &plan)
        .await
        .map_err(|e| persistence_err(user_id, e))?;

    Ok(Json(GeneratePlanResponse {
        message: "Meal plan generated".into(),
        plan,
    }))
}

#[instrument(skip(state, body))]
pub async fn analyze_ingredients(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeIngredientsRequest>,
) -> Result<Json<AnalyzeIngredientsResponse>, (StatusCode, Json<ErrorBody>)> {
    let foods = state.nutrition.search(&body.query).await.map_err(|e| {
        error!(error = %e, "nutrient lookup failed");
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorBody { error: e.to_string() }),
        )
    })?;
    Ok(Json(AnalyzeIngredientsResponse { foods }))
}

fn persistence_err(user_id: Uuid, e: anyhow::Error) -> (StatusCode, Json<ErrorBody>) {
    error!(error = %e, %user_id, "meal plan persistence failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "could not store meal plan".into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{CompletionClient, FoodRecord, NutritionLookup};
    use axum::async_trait;
    use std::sync::Arc;

    struct OneFoodLookup;

    #[async_trait]
    impl NutritionLookup for OneFoodLookup {
        async fn search(&self, _query: &str) -> anyhow::Result<Vec<FoodRecord>> {
            Ok(vec![FoodRecord {
                food_name: "egg".into(),
                serving_qty: Some(2.0),
                tags: None,
            }])
        }
    }

    struct BrokenLookup;

    #[async_trait]
    impl NutritionLookup for BrokenLookup {
        async fn search(&self, _query: &str) -> anyhow::Result<Vec<FoodRecord>> {
            anyhow::bail!("upstream down")
        }
    }

    struct NoCompletion;

    #[async_trait]
    impl CompletionClient for NoCompletion {
        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("not wired in this test")
        }
    }

    #[tokio::test]
    async fn analyze_ingredients_passes_lookup_through() {
        let state = AppState::fake(Arc::new(OneFoodLookup), Arc::new(NoCompletion));
        let body = AnalyzeIngredientsRequest {
            query: "2 eggs".into(),
        };
        let Json(response) = analyze_ingredients(State(state), Json(body)).await.unwrap();
        assert_eq!(response.foods.len(), 1);
        assert_eq!(response.foods[0].food_name, "egg");
    }

    #[tokio::test]
    async fn analyze_ingredients_maps_failure_to_bad_gateway() {
        let state = AppState::fake(Arc::new(BrokenLookup), Arc::new(NoCompletion));
        let body = AnalyzeIngredientsRequest {
            query: "2 eggs".into(),
        };
        let (status, _) = analyze_ingredients(State(state), Json(body))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
