//! Repository trait for tag data access.

use crate::domain::entities::{NewTag, Tag};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for tags and the tags of recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Returns every tag ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Tag>, AppError>;

    /// Finds a tag by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, tag_id: i64) -> Result<Option<Tag>, AppError>;

    /// Returns the subset of `ids` that has no tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError>;

    /// Persists a new tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or slug is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_tag: NewTag) -> Result<Tag, AppError>;

    /// Returns `(recipe_id, tag)` pairs for the given recipes, ordered by
    /// recipe then tag id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn for_recipes(&self, recipe_ids: &[i64]) -> Result<Vec<(i64, Tag)>, AppError>;
}
