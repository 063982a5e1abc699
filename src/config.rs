use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NutritionixConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub nutritionix: NutritionixConfig,
    pub completion: CompletionConfig,
    /// Applied to every outbound HTTP call.
    pub http_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let nutritionix = NutritionixConfig {
            base_url: std::env::var("NUTRITIONIX_BASE_URL")
                .unwrap_or_else(|_| "https://trackapi.nutritionix.com".into()),
            app_id: std::env::var("NUTRITIONIX_APP_ID")?,
            app_key: std::env::var("NUTRITIONIX_APP_KEY")?,
        };
        let completion = CompletionConfig {
            base_url: std::env::var("COMPLETION_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            api_key: std::env::var("COMPLETION_API_KEY")?,
            model: std::env::var("COMPLETION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            max_tokens: std::env::var("COMPLETION_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(2048),
        };
        let http_timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(20);
        Ok(Self {
            database_url,
            nutritionix,
            completion,
            http_timeout_secs,
        })
    }
}
