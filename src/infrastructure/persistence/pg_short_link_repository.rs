//! PostgreSQL implementation of short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_foreign_key_violation, unique_violation_constraint};

/// Unique constraint on `short_links.token`.
pub const TOKEN_UNIQUE_CONSTRAINT: &str = "short_links_token_key";

/// Unique constraint on `short_links.recipe_id`.
pub const RECIPE_UNIQUE_CONSTRAINT: &str = "short_links_recipe_id_key";

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    recipe_id: i64,
    token: String,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(row.id, row.recipe_id, row.token, row.created_at)
    }
}

/// PostgreSQL repository for recipe short links.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn token_exists(&self, token: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM short_links WHERE token = $1)",
        )
        .bind(token)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, recipe_id, token, created_at
            FROM short_links
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, recipe_id, token, created_at
            FROM short_links
            WHERE recipe_id = $1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn find_by_recipes(&self, recipe_ids: &[i64]) -> Result<Vec<ShortLink>, AppError> {
        let rows = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, recipe_id, token, created_at
            FROM short_links
            WHERE recipe_id = ANY($1)
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let result = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (recipe_id, token)
            VALUES ($1, $2)
            RETURNING id, recipe_id, token, created_at
            "#,
        )
        .bind(new_link.recipe_id)
        .bind(&new_link.token)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) => Err(map_insert_error(e, &new_link)),
        }
    }
}

fn map_insert_error(e: sqlx::Error, new_link: &NewShortLink) -> AppError {
    match unique_violation_constraint(&e).as_deref() {
        Some(TOKEN_UNIQUE_CONSTRAINT) => AppError::duplicate_link(
            "Short link token already taken",
            json!({ "token": new_link.token }),
        ),
        Some(RECIPE_UNIQUE_CONSTRAINT) => AppError::conflict(
            "Recipe already has a short link",
            json!({ "recipe_id": new_link.recipe_id }),
        ),
        _ if is_foreign_key_violation(&e) => AppError::not_found(
            "Recipe not found",
            json!({ "recipe_id": new_link.recipe_id }),
        ),
        _ => e.into(),
    }
}
