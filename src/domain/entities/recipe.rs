//! Recipe entity and its ingredient lines.

use chrono::{DateTime, Utc};

use crate::domain::entities::Ingredient;

/// Upper bound on recipes returned by one listing.
pub const RECIPE_LIST_LIMIT: i64 = 100;

/// A published recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

/// One ingredient requirement of a new recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    pub amount: i32,
}

/// Input data for creating a recipe together with its ingredient lines.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub ingredients: Vec<RecipeIngredient>,
    /// Tag ids.
    pub tags: Vec<i64>,
}

/// A recipe ingredient line joined with its ingredient reference data.
///
/// This is the unit the shopping list aggregation folds over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub recipe_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl IngredientLine {
    pub fn new(recipe_id: i64, name: &str, measurement_unit: &str, amount: i32) -> Self {
        Self {
            recipe_id,
            name: name.to_string(),
            measurement_unit: measurement_unit.to_string(),
            amount,
        }
    }
}

/// An ingredient of a stored recipe, with its reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredientAmount {
    pub recipe_id: i64,
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Which recipes a listing returns, newest first.
///
/// Every set criterion must hold. `tag_slugs` matches recipes carrying any of
/// the listed tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<i64>,
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<i64>,
    pub in_cart_of: Option<i64>,
    pub limit: i64,
}

impl Default for RecipeFilter {
    fn default() -> Self {
        Self {
            author_id: None,
            tag_slugs: Vec::new(),
            favorited_by: None,
            in_cart_of: None,
            limit: RECIPE_LIST_LIMIT,
        }
    }
}

impl RecipeFilter {
    /// Recipes of one author.
    pub fn by_author(author_id: i64, limit: i64) -> Self {
        Self {
            author_id: Some(author_id),
            limit,
            ..Self::default()
        }
    }
}
