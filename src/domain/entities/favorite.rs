//! Favorite recipes.

use chrono::{DateTime, Utc};

/// A recipe a user has marked as favorite.
///
/// At most one entry exists per (user, recipe) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub user_id: i64,
    pub recipe_id: i64,
    pub created_at: DateTime<Utc>,
}
