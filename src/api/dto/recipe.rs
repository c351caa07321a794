//! DTOs for recipe endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::application::services::{RecipeDetails, RecipeQuery};
use crate::domain::entities::{NewRecipe, Recipe, RecipeIngredient, RecipeIngredientAmount, Tag};

/// Request to publish a recipe.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1))]
    pub text: String,

    #[validate(range(min = 1))]
    pub cooking_time: i32,

    #[validate(length(min = 1, message = "A recipe needs at least one ingredient"))]
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredientItem>,

    /// Tag ids.
    #[serde(default)]
    #[validate(length(min = 1, message = "A recipe needs at least one tag"))]
    pub tags: Vec<i64>,
}

/// One ingredient of a recipe being created.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RecipeIngredientItem {
    /// Ingredient id.
    pub id: i64,

    #[validate(range(min = 1))]
    pub amount: i32,
}

impl CreateRecipeRequest {
    pub fn into_new_recipe(self, author_id: i64) -> NewRecipe {
        NewRecipe {
            author_id,
            name: self.name,
            text: self.text,
            cooking_time: self.cooking_time,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|item| RecipeIngredient {
                    ingredient_id: item.id,
                    amount: item.amount,
                })
                .collect(),
            tags: self.tags,
        }
    }
}

/// Query parameters of `GET /api/recipes`.
///
/// `tags` holds comma separated slugs; a recipe matches if it carries any of
/// them. The flags take `1` to filter and `0` (or nothing) not to.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub author: Option<i64>,

    #[serde(default)]
    pub tags: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub is_favorited: Option<u8>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub is_in_shopping_cart: Option<u8>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl From<RecipeListParams> for RecipeQuery {
    fn from(params: RecipeListParams) -> Self {
        RecipeQuery {
            author_id: params.author,
            tag_slugs: params
                .tags
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|slug| !slug.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            favorited: params.is_favorited == Some(1),
            in_shopping_cart: params.is_in_shopping_cart == Some(1),
            limit: params.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredientAmount> for RecipeIngredientResponse {
    fn from(item: RecipeIngredientAmount) -> Self {
        Self {
            id: item.ingredient.id,
            name: item.ingredient.name,
            measurement_unit: item.ingredient.measurement_unit,
            amount: item.amount,
        }
    }
}

/// A recipe as readers see it.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<Tag>,
    pub author: i64,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "short-link", skip_serializing_if = "Option::is_none")]
    pub short_link: Option<String>,
}

impl RecipeResponse {
    /// Builds the response; `short_url` turns a token into an absolute link.
    pub fn new(details: RecipeDetails, short_url: impl Fn(&str) -> String) -> Self {
        let recipe = details.recipe;
        Self {
            id: recipe.id,
            tags: details.tags,
            author: recipe.author_id,
            ingredients: details.ingredients.into_iter().map(Into::into).collect(),
            is_favorited: details.is_favorited,
            is_in_shopping_cart: details.is_in_shopping_cart,
            name: recipe.name,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            created_at: recipe.created_at,
            short_link: details.short_link_token.as_deref().map(short_url),
        }
    }
}

/// The short form of a recipe used in favorites and subscriptions.
#[derive(Debug, Serialize)]
pub struct ShortRecipeResponse {
    pub id: i64,
    pub name: String,
    pub cooking_time: i32,
}

impl From<Recipe> for ShortRecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}
