//! MongoDB implementations of the catalog repositories

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::CatalogResult;
use crate::models::{Category, Product};
use crate::repository::{CategoryRepository, ProductRepository};

pub const CATEGORIES: &str = "categories";
pub const PRODUCTS: &str = "products";

/// `{ field: { $regex: pattern, $options: "i" } }`
fn regex_filter(field: &str, pattern: &str) -> Document {
    doc! { field: { "$regex": pattern, "$options": "i" } }
}

fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

fn in_filter(field: &str, ids: Vec<ObjectId>) -> Document {
    doc! { field: { "$in": ids } }
}

/// MongoDB implementation of the CategoryRepository
#[derive(Clone)]
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, CATEGORIES)
    }

    /// Use a custom collection name (tests run against throwaway names)
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Category>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<Category> {
        &self.collection
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, category), fields(category_name = %category.name))]
    async fn insert(&self, category: Category) -> CatalogResult<Category> {
        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self, categories), fields(count = categories.len()))]
    async fn insert_many(&self, categories: Vec<Category>) -> CatalogResult<usize> {
        if categories.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(&categories).await?;

        tracing::info!(inserted = result.inserted_ids.len(), "Categories inserted");
        Ok(result.inserted_ids.len())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> CatalogResult<Option<Category>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn get_many(&self, ids: Vec<ObjectId>) -> CatalogResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self.collection.find(in_filter("_id", ids)).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn search_by_name(&self, pattern: &str) -> CatalogResult<Vec<Category>> {
        let cursor = self.collection.find(regex_filter("name", pattern)).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn replace(&self, category: Category) -> CatalogResult<bool> {
        let result = self
            .collection
            .replace_one(id_filter(category.id), &category)
            .await?;
        if result.matched_count == 0 {
            return Ok(false);
        }

        tracing::info!(category_id = %category.id, "Category updated");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(category_id = %id, "Category deleted");
        Ok(true)
    }
}

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS)
    }

    /// Use a custom collection name (tests run against throwaway names)
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Index the category reference (delete guard, category search) and titles.
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "title": 1 })
                .options(IndexOptions::builder().name("idx_title".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, product), fields(product_title = %product.title))]
    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    async fn insert_many(&self, products: Vec<Product>) -> CatalogResult<usize> {
        if products.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(&products).await?;

        tracing::info!(inserted = result.inserted_ids.len(), "Products inserted");
        Ok(result.inserted_ids.len())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> CatalogResult<Option<Product>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn search_by_title(&self, pattern: &str) -> CatalogResult<Vec<Product>> {
        let cursor = self.collection.find(regex_filter("title", pattern)).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, categories), fields(count = categories.len()))]
    async fn list_by_categories(&self, categories: Vec<ObjectId>) -> CatalogResult<Vec<Product>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .collection
            .find(in_filter("category", categories))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn count_by_category(&self, category: ObjectId) -> CatalogResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "category": category })
            .await?)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: Product) -> CatalogResult<bool> {
        let result = self
            .collection
            .replace_one(id_filter(product.id), &product)
            .await?;
        if result.matched_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %product.id, "Product updated");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ProductQuery;

    #[test]
    fn test_regex_filter_is_case_insensitive() {
        let query = ProductQuery::Title("Ham.mer".to_string());
        let filter = regex_filter("title", &query.pattern());

        let inner = filter.get_document("title").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), r"Ham\.mer");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_in_filter_lists_ids() {
        let ids = vec![ObjectId::new(), ObjectId::new()];
        let filter = in_filter("category", ids.clone());

        let values = filter
            .get_document("category")
            .unwrap()
            .get_array("$in")
            .unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].as_object_id(), Some(ids[0]));
    }

    #[test]
    fn test_id_filter_targets_primary_key() {
        let id = ObjectId::new();
        assert_eq!(id_filter(id).get_object_id("_id").unwrap(), id);
    }
}
