//! PostgreSQL implementation of shopping cart repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{IngredientLine, ShoppingCartEntry};
use crate::domain::repositories::ShoppingCartRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_foreign_key_violation, unique_violation_constraint};

#[derive(sqlx::FromRow)]
struct CartRow {
    user_id: i64,
    recipe_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct IngredientLineRow {
    recipe_id: i64,
    name: String,
    measurement_unit: String,
    amount: i32,
}

/// PostgreSQL repository for shopping carts.
pub struct PgShoppingCartRepository {
    pool: Arc<PgPool>,
}

impl PgShoppingCartRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShoppingCartRepository for PgShoppingCartRepository {
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<ShoppingCartEntry, AppError> {
        let result = sqlx::query_as::<_, CartRow>(
            r#"
            INSERT INTO shopping_cart (user_id, recipe_id)
            VALUES ($1, $2)
            RETURNING user_id, recipe_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(ShoppingCartEntry {
                user_id: row.user_id,
                recipe_id: row.recipe_id,
                created_at: row.created_at,
            }),
            Err(e) if unique_violation_constraint(&e).is_some() => Err(AppError::conflict(
                "Recipe is already in the shopping cart",
                json!({ "recipe_id": recipe_id }),
            )),
            Err(e) if is_foreign_key_violation(&e) => Err(AppError::not_found(
                "Recipe not found",
                json!({ "recipe_id": recipe_id }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM shopping_cart WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn contains(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM shopping_cart WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn in_cart_among(&self, user_id: i64, recipe_ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT recipe_id FROM shopping_cart WHERE user_id = $1 AND recipe_id = ANY($2)",
        )
        .bind(user_id)
        .bind(recipe_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn ingredient_lines_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<IngredientLine>, AppError> {
        let rows = sqlx::query_as::<_, IngredientLineRow>(
            r#"
            SELECT ri.recipe_id, i.name, i.measurement_unit, ri.amount
            FROM shopping_cart sc
            JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            ORDER BY sc.id, ri.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| IngredientLine {
                recipe_id: r.recipe_id,
                name: r.name,
                measurement_unit: r.measurement_unit,
                amount: r.amount,
            })
            .collect())
    }
}
