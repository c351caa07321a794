//! PostgreSQL implementation of ingredient repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::domain::repositories::IngredientRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct IngredientRow {
    id: i64,
    name: String,
    measurement_unit: String,
}

/// PostgreSQL repository for ingredient reference data.
pub struct PgIngredientRepository {
    pool: Arc<PgPool>,
}

impl PgIngredientRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` wildcards so user input only matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl IngredientRepository for PgIngredientRepository {
    async fn search(&self, prefix: &str, limit: i64) -> Result<Vec<Ingredient>, AppError> {
        let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));

        let rows = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT id, name, measurement_unit
            FROM ingredients
            WHERE LOWER(name) LIKE $1 ESCAPE '\'
            ORDER BY name, id
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Ingredient::new(r.id, r.name, r.measurement_unit))
            .collect())
    }

    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let missing = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT t.id
            FROM UNNEST($1::bigint[]) AS t(id)
            WHERE NOT EXISTS (SELECT 1 FROM ingredients i WHERE i.id = t.id)
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(missing)
    }

    async fn insert_many(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError> {
        let (names, units): (Vec<String>, Vec<String>) = ingredients
            .into_iter()
            .map(|i| (i.name, i.measurement_unit))
            .unzip();

        let result = sqlx::query(
            r#"
            INSERT INTO ingredients (name, measurement_unit)
            SELECT * FROM UNNEST($1::varchar[], $2::varchar[])
            "#,
        )
        .bind(&names)
        .bind(&units)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ingredients")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("flour"), "flour");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
