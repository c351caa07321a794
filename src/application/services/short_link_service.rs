//! Short link generation and resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::token_generator::ShortLinkConfig;

/// Service owning the recipe ⇄ token mapping.
///
/// A recipe gets at most one token and a token resolves to exactly one recipe.
/// Uniqueness is guaranteed by storage; [`ShortLinkRepository::token_exists`]
/// only saves a round trip on the common collision path.
pub struct ShortLinkService<S: ShortLinkRepository + ?Sized> {
    repository: Arc<S>,
    cache: Arc<dyn CacheService>,
    config: ShortLinkConfig,
}

impl<S: ShortLinkRepository + ?Sized> ShortLinkService<S> {
    pub fn new(repository: Arc<S>, cache: Arc<dyn CacheService>, config: ShortLinkConfig) -> Self {
        Self {
            repository,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &ShortLinkConfig {
        &self.config
    }

    /// Assigns a fresh random token to a recipe.
    ///
    /// Each attempt draws a token from the configured alphabet. A token that
    /// already exists, or that loses an insert race ([`AppError::DuplicateLink`]),
    /// costs one attempt. Any other storage error ends generation immediately.
    ///
    /// # Errors
    ///
    /// - [`AppError::Conflict`] if the recipe already has a short link
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::LinkGenerationExhausted`] after `max_attempts` collisions
    /// - [`AppError::Internal`] on storage errors
    pub async fn generate(&self, recipe_id: i64) -> Result<ShortLink, AppError> {
        if self.repository.find_by_recipe(recipe_id).await?.is_some() {
            return Err(AppError::conflict(
                "Recipe already has a short link",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        for attempt in 1..=self.config.max_attempts() {
            let token = self.config.generate_token(&mut rand::rng());

            if self.repository.token_exists(&token).await? {
                metrics::counter!("short_link_collisions_total").increment(1);
                debug!(recipe_id, attempt, "Short link token already taken");
                continue;
            }

            match self
                .repository
                .insert(NewShortLink {
                    recipe_id,
                    token,
                })
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::DuplicateLink { .. }) => {
                    metrics::counter!("short_link_collisions_total").increment(1);
                    debug!(recipe_id, attempt, "Short link token lost insert race");
                }
                Err(e) => return Err(e),
            }
        }

        metrics::counter!("short_link_generation_exhausted_total").increment(1);
        warn!(
            recipe_id,
            attempts = self.config.max_attempts(),
            "Short link generation exhausted"
        );

        Err(AppError::link_generation_exhausted(
            "Failed to generate a unique short link",
            json!({
                "recipe_id": recipe_id,
                "attempts": self.config.max_attempts(),
            }),
        ))
    }

    /// Resolves a token to its recipe id.
    ///
    /// Consults the cache first. On a miss the mapping is read from storage and
    /// written back to the cache before returning; cache errors fall back to
    /// storage. A link deleted while the write-back was in flight is evicted
    /// again, so a retired token never outlives its recipe in the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no recipe owns the token.
    pub async fn resolve(&self, token: &str) -> Result<i64, AppError> {
        match self.cache.get_recipe_id(token).await {
            Ok(Some(recipe_id)) => return Ok(recipe_id),
            Ok(None) => {}
            Err(e) => error!(token, error = %e, "Cache error, falling back to storage"),
        }

        let link = self.find_by_token(token).await?;

        if let Err(e) = self.cache.set_recipe_id(token, link.recipe_id, None).await {
            error!(token, error = %e, "Failed to cache short link");
            return Ok(link.recipe_id);
        }

        if self.repository.find_by_token(token).await?.is_none() {
            debug!(token, "Short link deleted during cache write-back");
            self.forget(token).await;
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "token": token }),
            ));
        }

        Ok(link.recipe_id)
    }

    /// Returns the short link of a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe has no short link.
    pub async fn link_for_recipe(&self, recipe_id: i64) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_recipe(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Short link not found",
                    json!({ "recipe_id": recipe_id }),
                )
            })
    }

    /// Drops a token from the redirect cache.
    pub async fn forget(&self, token: &str) {
        if let Err(e) = self.cache.invalidate(token).await {
            warn!(token, error = %e, "Failed to invalidate cached short link");
        }
    }

    /// Builds the public short URL served by `GET /s/{token}`.
    pub fn short_url(&self, host: &str, token: &str) -> String {
        format!("{}/s/{}", host.trim_end_matches('/'), token)
    }

    async fn find_by_token(&self, token: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "token": token })))
    }
}
