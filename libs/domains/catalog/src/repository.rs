use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::CatalogResult;
use crate::models::{Category, Product};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category, in store order
    async fn list(&self) -> CatalogResult<Vec<Category>>;

    /// Persist a new category
    async fn insert(&self, category: Category) -> CatalogResult<Category>;

    /// Persist a batch of categories in one round trip
    async fn insert_many(&self, categories: Vec<Category>) -> CatalogResult<usize>;

    /// Get a category by ID
    async fn get_by_id(&self, id: ObjectId) -> CatalogResult<Option<Category>>;

    /// Get every category whose id is in `ids`
    async fn get_many(&self, ids: Vec<ObjectId>) -> CatalogResult<Vec<Category>>;

    /// Categories whose name matches `pattern`, case-insensitively
    async fn search_by_name(&self, pattern: &str) -> CatalogResult<Vec<Category>>;

    /// Overwrite the stored document; `false` if it no longer exists
    async fn replace(&self, category: Category) -> CatalogResult<bool>;

    /// Delete a category by ID; `false` if nothing was removed
    async fn delete(&self, id: ObjectId) -> CatalogResult<bool>;
}

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, in store order
    async fn list(&self) -> CatalogResult<Vec<Product>>;

    /// Persist a new product
    async fn insert(&self, product: Product) -> CatalogResult<Product>;

    /// Persist a batch of products in one round trip
    async fn insert_many(&self, products: Vec<Product>) -> CatalogResult<usize>;

    /// Get a product by ID
    async fn get_by_id(&self, id: ObjectId) -> CatalogResult<Option<Product>>;

    /// Products whose title matches `pattern`, case-insensitively
    async fn search_by_title(&self, pattern: &str) -> CatalogResult<Vec<Product>>;

    /// Products referencing any of `categories`
    async fn list_by_categories(&self, categories: Vec<ObjectId>) -> CatalogResult<Vec<Product>>;

    /// Number of products referencing `category`
    async fn count_by_category(&self, category: ObjectId) -> CatalogResult<u64>;

    /// Overwrite the stored document; `false` if it no longer exists
    async fn replace(&self, product: Product) -> CatalogResult<bool>;

    /// Delete a product by ID; `false` if nothing was removed
    async fn delete(&self, id: ObjectId) -> CatalogResult<bool>;
}
