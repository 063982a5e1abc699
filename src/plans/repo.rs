use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::model::Plan;

/// The single current plan document for a user, plus when it was generated.
#[derive(Debug, Clone, FromRow)]
pub struct StoredPlan {
    pub plan: Json<Plan>,
    pub generated_at: OffsetDateTime,
}

/// Full replace; regenerating a plan never keeps history.
pub async fn save(db: &PgPool, user_id: Uuid, plan: &Plan) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meal_plans (user_id, plan, generated_at)
        VALUES ($1, $2, now())
        ON CONFLICT (user_id)
        DO UPDATE SET plan = EXCLUDED.plan, generated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(Json(plan))
    .execute(db)
    .await?;
    Ok(())
}

pub async fn load(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<StoredPlan>> {
    let row = sqlx::query_as::<_, StoredPlan>(
        r#"
        SELECT plan, generated_at
        FROM meal_plans
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}
