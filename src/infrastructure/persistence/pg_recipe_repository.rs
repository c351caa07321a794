//! PostgreSQL implementation of recipe repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    Ingredient, NewRecipe, Recipe, RecipeFilter, RecipeIngredientAmount,
};
use crate::domain::repositories::RecipeRepository;
use crate::error::AppError;
use crate::utils::db_error::is_foreign_key_violation;

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    author_id: i64,
    name: String,
    text: String,
    cooking_time: i32,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RecipeIngredientRow {
    recipe_id: i64,
    ingredient_id: i64,
    name: String,
    measurement_unit: String,
    amount: i32,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            author_id: row.author_id,
            name: row.name,
            text: row.text,
            cooking_time: row.cooking_time,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for recipes and their ingredient lines.
pub struct PgRecipeRepository {
    pool: Arc<PgPool>,
}

impl PgRecipeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, new_recipe: NewRecipe) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            INSERT INTO recipes (author_id, name, text, cooking_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, name, text, cooking_time, created_at
            "#,
        )
        .bind(new_recipe.author_id)
        .bind(&new_recipe.name)
        .bind(&new_recipe.text)
        .bind(new_recipe.cooking_time)
        .fetch_one(&mut *tx)
        .await?;

        let (ingredient_ids, amounts): (Vec<i64>, Vec<i32>) = new_recipe
            .ingredients
            .iter()
            .map(|line| (line.ingredient_id, line.amount))
            .unzip();

        sqlx::query(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
            SELECT $1, ingredient_id, amount
            FROM UNNEST($2::bigint[], $3::int[]) AS t(ingredient_id, amount)
            "#,
        )
        .bind(row.id)
        .bind(&ingredient_ids)
        .bind(&amounts)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::bad_request(
                    "Unknown ingredient",
                    json!({ "ingredient_ids": ingredient_ids }),
                )
            } else {
                e.into()
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO recipe_tags (recipe_id, tag_id)
            SELECT $1, tag_id FROM UNNEST($2::bigint[]) AS t(tag_id)
            "#,
        )
        .bind(row.id)
        .bind(&new_recipe.tags)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::bad_request("Unknown tag", json!({ "tag_ids": new_recipe.tags }))
            } else {
                e.into()
            }
        })?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, recipe_id: i64) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, author_id, name, text, cooking_time, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn exists(&self, recipe_id: i64) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM recipes WHERE id = $1)")
                .bind(recipe_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn delete(&self, recipe_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, AppError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT r.id, r.author_id, r.name, r.text, r.cooking_time, r.created_at
            FROM recipes r
            WHERE ($1::bigint IS NULL OR r.author_id = $1)
              AND (cardinality($2::text[]) = 0 OR EXISTS (
                    SELECT 1 FROM recipe_tags rt
                    JOIN tags t ON t.id = rt.tag_id
                    WHERE rt.recipe_id = r.id AND t.slug = ANY($2)))
              AND ($3::bigint IS NULL OR EXISTS (
                    SELECT 1 FROM favorites f WHERE f.recipe_id = r.id AND f.user_id = $3))
              AND ($4::bigint IS NULL OR EXISTS (
                    SELECT 1 FROM shopping_cart sc WHERE sc.recipe_id = r.id AND sc.user_id = $4))
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $5
            "#,
        )
        .bind(filter.author_id)
        .bind(&filter.tag_slugs)
        .bind(filter.favorited_by)
        .bind(filter.in_cart_of)
        .bind(filter.limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ingredients_for(
        &self,
        recipe_ids: &[i64],
    ) -> Result<Vec<RecipeIngredientAmount>, AppError> {
        let rows = sqlx::query_as::<_, RecipeIngredientRow>(
            r#"
            SELECT ri.recipe_id, i.id AS ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ANY($1)
            ORDER BY ri.id
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RecipeIngredientAmount {
                recipe_id: r.recipe_id,
                ingredient: Ingredient::new(r.ingredient_id, r.name, r.measurement_unit),
                amount: r.amount,
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
                .bind(author_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
