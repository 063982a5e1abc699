use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::clients::CompletionClient;
use crate::profile::repo::UserProfile;

use super::model::{DayPlan, Plan, DAYS_PER_PLAN};

/// Everything that can go wrong between "user asked for a plan" and "a valid
/// plan exists". Callers must not persist anything when one of these comes
/// back.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("plan generation request failed: {0}")]
    Upstream(#[source] anyhow::Error),
    #[error("plan generator returned text that is not JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("plan generator returned JSON with the wrong shape: {0}")]
    Shape(String),
}

pub fn build_prompt(profile: &UserProfile) -> String {
    let goal = profile.goal.as_deref().unwrap_or("general healthy eating");
    let diet = profile.diet.as_deref().unwrap_or("no specific diet");
    let calories = profile
        .daily_calorie_target
        .map(|c| format!("around {c} kcal per day"))
        .unwrap_or_else(|| "a sensible daily calorie total".to_string());
    let allergies = if profile.allergies.is_empty() {
        "none".to_string()
    } else {
        profile.allergies.join(", ")
    };

    format!(
        r#"Create a 7 day meal plan for a user with goal "{goal}", diet "{diet}",
targeting {calories}. Allergies to avoid: {allergies}.

For each day include breakfast, lunch, snack and dinner with an estimated
calorie and protein value per meal.

Respond in JSON format only, no extra text, shaped like:
{{"days": [{{"day": "Day 1", "meals": {{"breakfast": {{"title": "...", "description": "...", "calories": 350, "protein": 20}}, "lunch": {{...}}, "snack": {{...}}, "dinner": {{...}}}}}}, ...]}}

The "days" array must contain exactly {DAYS_PER_PLAN} entries."#
    )
}

/// Generators tend to wrap the JSON in markdown fences or to answer with a
/// bare day array instead of the documented object; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlanPayload {
    Wrapped { days: Vec<DayPlan> },
    Bare(Vec<DayPlan>),
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the fence line ("```json" or similar) and the closing fence
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().trim_end_matches("```").trim()
}

pub fn parse_plan(text: &str) -> Result<Plan, GenerateError> {
    let body = strip_code_fences(text);
    let payload: PlanPayload = serde_json::from_str(body).map_err(GenerateError::Parse)?;
    let plan = match payload {
        PlanPayload::Wrapped { days } => Plan { days },
        PlanPayload::Bare(days) => Plan { days },
    };
    plan.validate().map_err(GenerateError::Shape)?;
    Ok(plan)
}

/// Prompt, complete, parse, validate. Persistence stays with the caller so a
/// failed generation can never leave a partial plan behind.
pub async fn generate_plan(
    completion: &dyn CompletionClient,
    profile: &UserProfile,
) -> Result<Plan, GenerateError> {
    let prompt = build_prompt(profile);
    debug!(user_id = %profile.user_id, "requesting meal plan generation");
    let text = completion
        .complete(&prompt)
        .await
        .map_err(GenerateError::Upstream)?;
    parse_plan(&text)
}
