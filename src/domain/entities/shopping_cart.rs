//! Shopping cart membership.

use chrono::{DateTime, Utc};

/// A recipe a user has put in their shopping cart.
///
/// At most one entry exists per (user, recipe) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingCartEntry {
    pub user_id: i64,
    pub recipe_id: i64,
    pub created_at: DateTime<Utc>,
}
