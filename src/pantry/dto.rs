use serde::{Deserialize, Serialize};

use super::services::ReconcileOutcome;

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    #[serde(flatten)]
    pub outcome: ReconcileOutcome,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPantryItemBody {
    pub name: String,
    pub quantity: f64,
    pub category: Option<String>,
}
