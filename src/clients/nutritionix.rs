use anyhow::Context;
use axum::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::NutritionixConfig;

/// One matched food from the natural-language nutrients endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodRecord {
    pub food_name: String,
    pub serving_qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<FoodTags>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodTags {
    pub item: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NutrientsResponse {
    #[serde(default)]
    foods: Vec<FoodRecord>,
}

#[derive(Debug, Serialize)]
struct NutrientsRequest<'a> {
    query: &'a str,
}

#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<FoodRecord>>;
}

#[derive(Clone)]
pub struct NutritionixClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
}

impl NutritionixClient {
    pub fn new(cfg: &NutritionixConfig, timeout: std::time::Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build nutritionix http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            app_id: cfg.app_id.clone(),
            app_key: cfg.app_key.clone(),
        })
    }
}

#[async_trait]
impl NutritionLookup for NutritionixClient {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<FoodRecord>> {
        let url = format!("{}/v2/natural/nutrients", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-app-id", &self.app_id)
            .header("x-app-key", &self.app_key)
            .json(&NutrientsRequest { query })
            .send()
            .await
            .context("nutritionix request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("nutritionix returned {}: {}", status, body);
        }

        let parsed: NutrientsResponse = response.json().await.context("nutritionix response body")?;
        Ok(parsed.foods)
    }
}
