//! Subscriptions between users.

use chrono::{DateTime, Utc};

/// A user following an author's recipes.
///
/// Nobody subscribes to themselves, and a pair is stored at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub subscriber_id: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}
