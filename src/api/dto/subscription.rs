//! DTOs for subscription endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::api::dto::recipe::ShortRecipeResponse;
use crate::application::services::AuthorSummary;

/// Query parameters shared by subscribe and the subscription list.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionParams {
    /// How many of the author's newest recipes to include.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub recipes_limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub author: i64,
    pub recipes_count: i64,
    pub recipes: Vec<ShortRecipeResponse>,
}

impl From<AuthorSummary> for SubscriptionResponse {
    fn from(summary: AuthorSummary) -> Self {
        Self {
            author: summary.author_id,
            recipes_count: summary.recipes_count,
            recipes: summary.recipes.into_iter().map(Into::into).collect(),
        }
    }
}
