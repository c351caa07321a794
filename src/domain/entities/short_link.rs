//! Short link entity mapping a token to a recipe.

use chrono::{DateTime, Utc};

/// A short link assigned to a recipe.
///
/// Each recipe has at most one short link and each token belongs to exactly one
/// recipe. Links are never updated; they disappear with their recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub recipe_id: i64,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    pub fn new(id: i64, recipe_id: i64, token: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            recipe_id,
            token,
            created_at,
        }
    }

    /// Path of the recipe page this link redirects to.
    pub fn target_path(&self) -> String {
        format!("/recipes/{}", self.recipe_id)
    }
}

/// Input data for persisting a short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub recipe_id: i64,
    pub token: String,
}
