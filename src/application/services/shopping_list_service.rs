//! Shopping list building and CSV export.

use std::sync::Arc;

use tracing::debug;

use crate::domain::repositories::ShoppingCartRepository;
use crate::domain::shopping_list::ShoppingList;
use crate::error::AppError;
use crate::utils::csv_export::render_shopping_list;

/// Turns a user's shopping cart into an aggregated shopping list.
pub struct ShoppingListService<C: ShoppingCartRepository + ?Sized> {
    cart_repository: Arc<C>,
}

impl<C: ShoppingCartRepository + ?Sized> ShoppingListService<C> {
    pub fn new(cart_repository: Arc<C>) -> Self {
        Self { cart_repository }
    }

    /// Aggregates the ingredient lines of every recipe in the user's cart.
    ///
    /// An empty cart yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn build(&self, user_id: i64) -> Result<ShoppingList, AppError> {
        let lines = self.cart_repository.ingredient_lines_for_user(user_id).await?;
        let list = ShoppingList::aggregate(&lines);

        debug!(
            user_id,
            lines = lines.len(),
            entries = list.len(),
            "Shopping list built"
        );

        Ok(list)
    }

    /// Builds the shopping list and renders it as a CSV document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database or encoding errors.
    pub async fn export_csv(&self, user_id: i64) -> Result<Vec<u8>, AppError> {
        let list = self.build(user_id).await?;
        render_shopping_list(&list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::IngredientLine;
    use crate::domain::repositories::MockShoppingCartRepository;
    use crate::domain::shopping_list::AggregationKey;
    use crate::utils::csv_export::UTF8_BOM;

    fn service_with_lines(lines: Vec<IngredientLine>) -> ShoppingListService<MockShoppingCartRepository> {
        let mut repo = MockShoppingCartRepository::new();
        repo.expect_ingredient_lines_for_user()
            .withf(|user_id| *user_id == 1)
            .times(1)
            .returning(move |_| Ok(lines.clone()));
        ShoppingListService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_build_aggregates_cart() {
        let service = service_with_lines(vec![
            IngredientLine::new(1, "flour", "g", 200),
            IngredientLine::new(1, "egg", "pcs", 2),
            IngredientLine::new(2, "flour", "g", 100),
            IngredientLine::new(2, "egg", "pcs", 1),
            IngredientLine::new(2, "milk", "ml", 50),
        ]);

        let list = service.build(1).await.unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.total(&AggregationKey::new("flour", "g")), Some(300));
        assert_eq!(list.total(&AggregationKey::new("egg", "pcs")), Some(3));
        assert_eq!(list.total(&AggregationKey::new("milk", "ml")), Some(50));
    }

    #[tokio::test]
    async fn test_export_csv() {
        let service = service_with_lines(vec![
            IngredientLine::new(1, "flour", "g", 200),
            IngredientLine::new(2, "flour", "g", 100),
        ]);

        let body = service.export_csv(1).await.unwrap();

        assert!(body.starts_with(UTF8_BOM));
        assert_eq!(&body[UTF8_BOM.len()..], b"\"flour, g\",300\r\n");
    }

    #[tokio::test]
    async fn test_export_empty_cart() {
        let service = service_with_lines(vec![]);

        let body = service.export_csv(1).await.unwrap();

        assert_eq!(body, UTF8_BOM);
    }

    #[tokio::test]
    async fn test_build_propagates_errors() {
        let mut repo = MockShoppingCartRepository::new();
        repo.expect_ingredient_lines_for_user()
            .returning(|_| Err(AppError::internal("Database error", serde_json::json!({}))));
        let service = ShoppingListService::new(Arc::new(repo));

        let result = service.build(1).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
