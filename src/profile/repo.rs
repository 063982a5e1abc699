use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Onboarding preferences; the generator prompt is built from these.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub goal: Option<String>,
    pub diet: Option<String>,
    pub allergies: Vec<String>,
    pub daily_calorie_target: Option<i32>,
}

impl UserProfile {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            goal: None,
            diet: None,
            allergies: Vec::new(),
            daily_calorie_target: None,
        }
    }
}

pub async fn get(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<UserProfile>> {
    let row = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT user_id, goal, diet, allergies, daily_calorie_target
        FROM user_profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn upsert(db: &PgPool, profile: &UserProfile) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (user_id, goal, diet, allergies, daily_calorie_target)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id)
        DO UPDATE SET goal = EXCLUDED.goal,
                      diet = EXCLUDED.diet,
                      allergies = EXCLUDED.allergies,
                      daily_calorie_target = EXCLUDED.daily_calorie_target
        "#,
    )
    .bind(profile.user_id)
    .bind(&profile.goal)
    .bind(&profile.diet)
    .bind(&profile.allergies)
    .bind(profile.daily_calorie_target)
    .execute(db)
    .await?;
    Ok(())
}
