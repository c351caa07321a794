//! DTOs for shopping cart endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShoppingCartEntry;

#[derive(Debug, Serialize)]
pub struct ShoppingCartResponse {
    pub recipe_id: i64,
    pub added_at: DateTime<Utc>,
}

impl From<ShoppingCartEntry> for ShoppingCartResponse {
    fn from(entry: ShoppingCartEntry) -> Self {
        Self {
            recipe_id: entry.recipe_id,
            added_at: entry.created_at,
        }
    }
}
