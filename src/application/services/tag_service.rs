//! Tag reference data.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{NewTag, Tag};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

/// Maximum length of a tag name and of a tag slug.
pub const TAG_FIELD_MAX_LEN: usize = 32;

pub struct TagService<T: TagRepository + ?Sized> {
    repository: Arc<T>,
}

impl<T: TagRepository + ?Sized> TagService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<Tag>, AppError> {
        self.repository.list().await
    }

    /// Returns one tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no tag has this id.
    pub async fn get(&self, tag_id: i64) -> Result<Tag, AppError> {
        self.repository
            .find_by_id(tag_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "tag_id": tag_id })))
    }

    /// Validates and stores a tag.
    ///
    /// The name is trimmed and must hold 1 to 32 characters. The slug must
    /// hold 1 to 32 characters from `[-a-zA-Z0-9_]`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the name or slug is malformed
    /// - [`AppError::Conflict`] if the name or slug is taken
    pub async fn create(&self, new_tag: NewTag) -> Result<Tag, AppError> {
        let new_tag = NewTag {
            name: new_tag.name.trim().to_string(),
            slug: new_tag.slug.trim().to_string(),
        };
        validate_tag(&new_tag)?;

        let tag = self.repository.insert(new_tag).await?;
        info!(tag_id = tag.id, slug = %tag.slug, "Tag created");
        Ok(tag)
    }
}

fn validate_tag(tag: &NewTag) -> Result<(), AppError> {
    let name_len = tag.name.chars().count();
    if name_len == 0 || name_len > TAG_FIELD_MAX_LEN {
        return Err(AppError::bad_request(
            "Tag name must hold 1 to 32 characters",
            json!({ "field": "name" }),
        ));
    }

    let slug_ok = !tag.slug.is_empty()
        && tag.slug.len() <= TAG_FIELD_MAX_LEN
        && tag
            .slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !slug_ok {
        return Err(AppError::bad_request(
            "Tag slug must hold 1 to 32 characters of [-a-zA-Z0-9_]",
            json!({ "field": "slug", "slug": tag.slug }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTagRepository;

    fn new_tag(name: &str, slug: &str) -> NewTag {
        NewTag {
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_stores() {
        let mut repo = MockTagRepository::new();
        repo.expect_insert()
            .withf(|tag| tag.name == "Breakfast" && tag.slug == "breakfast")
            .times(1)
            .returning(|tag| {
                Ok(Tag {
                    id: 1,
                    name: tag.name,
                    slug: tag.slug,
                })
            });

        let service = TagService::new(Arc::new(repo));
        let tag = service.create(new_tag("  Breakfast ", "breakfast")).await.unwrap();

        assert_eq!(tag.id, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_tags() {
        let long = "x".repeat(33);
        let cases = [
            new_tag("", "empty-name"),
            new_tag(&long, "long-name"),
            new_tag("Lunch", ""),
            new_tag("Lunch", "with space"),
            new_tag("Lunch", "обед"),
            new_tag("Lunch", &long),
        ];

        for case in cases {
            let mut repo = MockTagRepository::new();
            repo.expect_insert().never();

            let result = TagService::new(Arc::new(repo)).create(case).await;

            assert!(matches!(result, Err(AppError::Validation { .. })));
        }
    }

    #[tokio::test]
    async fn test_get_unknown_tag() {
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = TagService::new(Arc::new(repo)).get(9).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
