use serde::{Deserialize, Serialize};

use crate::clients::FoodRecord;

use super::model::Plan;

#[derive(Debug, Serialize)]
pub struct GeneratePlanResponse {
    pub message: String,
    pub plan: Plan,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeIngredientsRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeIngredientsResponse {
    pub foods: Vec<FoodRecord>,
}
