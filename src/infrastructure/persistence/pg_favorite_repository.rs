//! PostgreSQL implementation of favorite repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::FavoriteEntry;
use crate::domain::repositories::FavoriteRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_foreign_key_violation, unique_violation_constraint};

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    user_id: i64,
    recipe_id: i64,
    created_at: DateTime<Utc>,
}

/// PostgreSQL repository for favorite recipes.
pub struct PgFavoriteRepository {
    pool: Arc<PgPool>,
}

impl PgFavoriteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<FavoriteEntry, AppError> {
        let result = sqlx::query_as::<_, FavoriteRow>(
            r#"
            INSERT INTO favorites (user_id, recipe_id)
            VALUES ($1, $2)
            RETURNING user_id, recipe_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(FavoriteEntry {
                user_id: row.user_id,
                recipe_id: row.recipe_id,
                created_at: row.created_at,
            }),
            Err(e) if unique_violation_constraint(&e).is_some() => Err(AppError::conflict(
                "Recipe is already a favorite",
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
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn favorited_among(
        &self,
        user_id: i64,
        recipe_ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT recipe_id FROM favorites WHERE user_id = $1 AND recipe_id = ANY($2)",
        )
        .bind(user_id)
        .bind(recipe_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorites")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
