use std::sync::Arc;

use tracing::instrument;

use super::{CATEGORY_DELETED, CATEGORY_UPDATED};
use crate::error::{CatalogError, CatalogResult, Entity};
use crate::ids::parse_id;
use crate::models::{Category, CreateCategory, MessageResponse, UpdateCategory};
use crate::repository::{CategoryRepository, ProductRepository};

/// Category operations, including the guard that keeps referenced
/// categories from being deleted.
pub struct CategoryService<C: CategoryRepository, P: ProductRepository> {
    categories: Arc<C>,
    products: Arc<P>,
}

impl<C: CategoryRepository, P: ProductRepository> CategoryService<C, P> {
    pub fn new(categories: Arc<C>, products: Arc<P>) -> Self {
        Self {
            categories,
            products,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.categories.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        let category = input.into_category().map_err(CatalogError::Validation)?;
        self.categories.insert(category).await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: &str) -> CatalogResult<Category> {
        let id = parse_id(id, Entity::Category)?;
        self.categories
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(Entity::Category))
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: &str,
        input: UpdateCategory,
    ) -> CatalogResult<MessageResponse> {
        let id = parse_id(id, Entity::Category)?;
        let mut category = self
            .categories
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(Entity::Category))?;

        category.apply_update(input);

        if !self.categories.replace(category).await? {
            return Err(CatalogError::NotFound(Entity::Category));
        }
        Ok(MessageResponse::new(CATEGORY_UPDATED))
    }

    /// Delete a category that no product references.
    ///
    /// The count and the delete are separate store calls; a product created
    /// in between is not detected.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &str) -> CatalogResult<MessageResponse> {
        let id = parse_id(id, Entity::Category)?;
        if self.categories.get_by_id(id).await?.is_none() {
            return Err(CatalogError::NotFound(Entity::Category));
        }

        let dependents = self.products.count_by_category(id).await?;
        if dependents > 0 {
            tracing::info!(category_id = %id, dependents, "Refusing to delete referenced category");
            return Err(CatalogError::HasDependents);
        }

        if !self.categories.delete(id).await? {
            return Err(CatalogError::NotFound(Entity::Category));
        }
        Ok(MessageResponse::new(CATEGORY_DELETED))
    }
}

impl<C: CategoryRepository, P: ProductRepository> Clone for CategoryService<C, P> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            products: Arc::clone(&self.products),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;
    use crate::repository::{MockCategoryRepository, MockProductRepository};
    use mockall::predicate::eq;
    use mongodb::bson::oid::ObjectId;

    fn service(
        categories: MockCategoryRepository,
        products: MockProductRepository,
    ) -> CategoryService<MockCategoryRepository, MockProductRepository> {
        CategoryService::new(Arc::new(categories), Arc::new(products))
    }

    #[tokio::test]
    async fn test_create_persists_valid_category() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_insert()
            .withf(|c| c.name == "Tools")
            .times(1)
            .returning(Ok);

        let created = service(categories, MockProductRepository::new())
            .create_category(CreateCategory {
                name: Some("Tools".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Tools");
    }

    #[tokio::test]
    async fn test_create_without_name_never_reaches_store() {
        let err = service(MockCategoryRepository::new(), MockProductRepository::new())
            .create_category(CreateCategory::default())
            .await
            .unwrap_err();

        match err {
            CatalogError::Validation(fields) => {
                assert_eq!(fields.get(Field::Name), Some("Category name is required."))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_ids_never_reach_store() {
        let svc = service(MockCategoryRepository::new(), MockProductRepository::new());

        assert!(matches!(
            svc.get_category("").await,
            Err(CatalogError::MissingId)
        ));
        assert!(matches!(
            svc.get_category("123").await,
            Err(CatalogError::InvalidId(Entity::Category))
        ));
        assert!(matches!(
            svc.update_category("xyz", UpdateCategory::default()).await,
            Err(CatalogError::InvalidId(Entity::Category))
        ));
        assert!(matches!(
            svc.delete_category("zzzzzzzzzzzzzzzzzzzzzzzz").await,
            Err(CatalogError::InvalidId(Entity::Category))
        ));
    }

    #[tokio::test]
    async fn test_get_unknown_category() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_get_by_id().returning(|_| Ok(None));

        let err = service(categories, MockProductRepository::new())
            .get_category(&ObjectId::new().to_hex())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(Entity::Category)));
    }

    #[tokio::test]
    async fn test_update_merges_and_confirms() {
        let existing = Category::new("Tools");
        let id = existing.id;

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        categories
            .expect_replace()
            .withf(move |c| c.id == id && c.name == "Garden")
            .times(1)
            .returning(|_| Ok(true));

        let message = service(categories, MockProductRepository::new())
            .update_category(
                &id.to_hex(),
                UpdateCategory {
                    name: Some("Garden".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(message.message, "Category updated.");
    }

    #[tokio::test]
    async fn test_delete_refused_while_products_reference_category() {
        let tools = Category::new("Tools");
        let id = tools.id;

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .returning(move |_| Ok(Some(tools.clone())));
        categories.expect_delete().never();

        let mut products = MockProductRepository::new();
        products
            .expect_count_by_category()
            .with(eq(id))
            .returning(|_| Ok(1));

        let err = service(categories, products)
            .delete_category(&id.to_hex())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::HasDependents));
    }

    #[tokio::test]
    async fn test_delete_unreferenced_category() {
        let tools = Category::new("Tools");
        let id = tools.id;

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .returning(move |_| Ok(Some(tools.clone())));
        categories
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let mut products = MockProductRepository::new();
        products.expect_count_by_category().returning(|_| Ok(0));

        let message = service(categories, products)
            .delete_category(&id.to_hex())
            .await
            .unwrap();

        assert_eq!(message.message, "Category deleted.");
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list()
            .returning(|| Err(CatalogError::Database("connection reset".into())));

        let err = service(categories, MockProductRepository::new())
            .list_categories()
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Database(_)));
    }
}
