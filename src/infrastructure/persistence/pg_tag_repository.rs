//! PostgreSQL implementation of tag repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewTag, Tag};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;
use crate::utils::db_error::unique_violation_constraint;

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
    slug: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    id: i64,
    name: String,
    slug: String,
}

/// PostgreSQL repository for tags.
pub struct PgTagRepository {
    pool: Arc<PgPool>,
}

impl PgTagRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, AppError> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name, slug FROM tags ORDER BY id")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, tag_id: i64) -> Result<Option<Tag>, AppError> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, name, slug FROM tags WHERE id = $1")
            .bind(tag_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let missing = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT t.id
            FROM UNNEST($1::bigint[]) AS t(id)
            WHERE NOT EXISTS (SELECT 1 FROM tags WHERE tags.id = t.id)
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(missing)
    }

    async fn insert(&self, new_tag: NewTag) -> Result<Tag, AppError> {
        let result = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(&new_tag.name)
        .bind(&new_tag.slug)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) => match unique_violation_constraint(&e) {
                Some(constraint) => Err(AppError::conflict(
                    "Tag name or slug already taken",
                    json!({
                        "name": new_tag.name,
                        "slug": new_tag.slug,
                        "constraint": constraint,
                    }),
                )),
                None => Err(e.into()),
            },
        }
    }

    async fn for_recipes(&self, recipe_ids: &[i64]) -> Result<Vec<(i64, Tag)>, AppError> {
        let rows = sqlx::query_as::<_, RecipeTagRow>(
            r#"
            SELECT rt.recipe_id, t.id, t.name, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = ANY($1)
            ORDER BY rt.recipe_id, t.id
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.recipe_id,
                    Tag {
                        id: r.id,
                        name: r.name,
                        slug: r.slug,
                    },
                )
            })
            .collect())
    }
}
