use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PantryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Unit-less count; quantities are not comparable across foods.
    pub quantity: f64,
    pub category: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingListItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub checked: bool,
    pub created_at: OffsetDateTime,
}

/// A shopping-list addition the reconciler decided on; `checked` starts false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewShoppingItem {
    pub name: String,
    pub category: String,
    pub quantity: i32,
}

pub async fn list_pantry(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<PantryItem>> {
    let rows = sqlx::query_as::<_, PantryItem>(
        r#"
        SELECT id, user_id, name, quantity, category, created_at
        FROM pantry_items
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_pantry_item(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    quantity: f64,
    category: Option<&str>,
) -> anyhow::Result<PantryItem> {
    let row = sqlx::query_as::<_, PantryItem>(
        r#"
        INSERT INTO pantry_items (user_id, name, quantity, category)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, name, quantity, category, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(quantity)
    .bind(category)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_shopping(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ShoppingListItem>> {
    let rows = sqlx::query_as::<_, ShoppingListItem>(
        r#"
        SELECT id, user_id, name, category, quantity, checked, created_at
        FROM shopping_list_items
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// All-or-nothing: either every addition lands on the list or none do.
pub async fn insert_shopping_items(
    db: &PgPool,
    user_id: Uuid,
    items: &[NewShoppingItem],
) -> anyhow::Result<()> {
    let mut tx = db.begin().await?;
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO shopping_list_items (user_id, name, category, quantity, checked)
            VALUES ($1, $2, $3, $4, false)
            "#,
        )
        .bind(user_id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
