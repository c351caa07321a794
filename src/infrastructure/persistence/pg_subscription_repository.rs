//! PostgreSQL implementation of subscription repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Subscription;
use crate::domain::repositories::SubscriptionRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_check_violation, unique_violation_constraint};

#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    subscriber_id: i64,
    author_id: i64,
    created_at: DateTime<Utc>,
}

/// PostgreSQL repository for subscriptions.
pub struct PgSubscriptionRepository {
    pool: Arc<PgPool>,
}

impl PgSubscriptionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn add(&self, subscriber_id: i64, author_id: i64) -> Result<Subscription, AppError> {
        let result = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            INSERT INTO subscriptions (subscriber_id, author_id)
            VALUES ($1, $2)
            RETURNING subscriber_id, author_id, created_at
            "#,
        )
        .bind(subscriber_id)
        .bind(author_id)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(Subscription {
                subscriber_id: row.subscriber_id,
                author_id: row.author_id,
                created_at: row.created_at,
            }),
            Err(e) if unique_violation_constraint(&e).is_some() => Err(AppError::conflict(
                "Already subscribed to this author",
                json!({ "author_id": author_id }),
            )),
            Err(e) if is_check_violation(&e) => Err(AppError::bad_request(
                "Cannot subscribe to yourself",
                json!({ "author_id": author_id }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, subscriber_id: i64, author_id: i64) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = $1 AND author_id = $2")
                .bind(subscriber_id)
                .bind(author_id)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn authors_of(&self, subscriber_id: i64) -> Result<Vec<i64>, AppError> {
        let authors = sqlx::query_scalar::<_, i64>(
            "SELECT author_id FROM subscriptions WHERE subscriber_id = $1 ORDER BY id",
        )
        .bind(subscriber_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(authors)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscriptions")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
