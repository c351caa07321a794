//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// The storage layer owns the uniqueness guarantees: one link per recipe and
/// one recipe per token. Existence checks are only a fast path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Returns whether any short link already uses `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn token_exists(&self, token: &str) -> Result<bool, AppError>;

    /// Finds the short link with the given token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<ShortLink>, AppError>;

    /// Finds the short link of a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError>;

    /// Finds the short links of several recipes; unlinked recipes are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_recipes(&self, recipe_ids: &[i64]) -> Result<Vec<ShortLink>, AppError>;

    /// Persists a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateLink`] if the token is already taken,
    /// [`AppError::Conflict`] if the recipe already has a link,
    /// [`AppError::NotFound`] if the recipe does not exist, and
    /// [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;
}
