use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use tracing::instrument;

use super::{PRODUCT_DELETED, PRODUCT_UPDATED};
use crate::error::{CatalogError, CatalogResult, Entity};
use crate::ids::parse_id;
use crate::models::{
    Category, CreateProduct, Field, FieldErrors, MessageResponse, Product, ProductResponse,
    UpdateProduct, CATEGORY_MISSING,
};
use crate::query::ProductQuery;
use crate::repository::{CategoryRepository, ProductRepository};

/// Result of a product search
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Found(Vec<ProductResponse>),
    Empty,
}

/// Product operations; category references are checked against the
/// category store and resolved for display.
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: Arc<P>, categories: Arc<C>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Every product with its category resolved to `{id, name}`.
    ///
    /// One lookup over the distinct referenced ids, merged in memory.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> CatalogResult<Vec<ProductResponse>> {
        let products = self.products.list().await?;
        let ids: BTreeSet<ObjectId> = products.iter().map(|p| p.category).collect();
        let categories = self.category_index(ids.into_iter().collect()).await?;

        Ok(products
            .into_iter()
            .map(|p| {
                let category = categories.get(&p.category);
                ProductResponse::resolved(p, category)
            })
            .collect())
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<ProductResponse> {
        let draft = input.into_draft().map_err(CatalogError::Validation)?;
        self.ensure_category_exists(draft.category).await?;

        let product = self.products.insert(draft.into_product()).await?;
        Ok(ProductResponse::unresolved(product))
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> CatalogResult<ProductResponse> {
        let product = self.find(id).await?;
        let category = self.categories.get_by_id(product.category).await?;
        Ok(ProductResponse::resolved(product, category.as_ref()))
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: &str,
        input: UpdateProduct,
    ) -> CatalogResult<MessageResponse> {
        let mut product = self.find(id).await?;

        let category = input.category_id().map_err(CatalogError::Validation)?;
        if let Some(category) = category.filter(|c| *c != product.category) {
            self.ensure_category_exists(category).await?;
        }

        product.apply_update(input, category);
        if !self.products.replace(product).await? {
            return Err(CatalogError::NotFound(Entity::Product));
        }
        Ok(MessageResponse::new(PRODUCT_UPDATED))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> CatalogResult<MessageResponse> {
        let id = parse_id(id, Entity::Product)?;
        if !self.products.delete(id).await? {
            return Err(CatalogError::NotFound(Entity::Product));
        }
        Ok(MessageResponse::new(PRODUCT_DELETED))
    }

    /// Search by product title or by category name.
    ///
    /// Title matches carry the bare category id; category matches embed the
    /// whole category. Products whose category no longer exists are dropped
    /// from category matches.
    #[instrument(skip(self))]
    pub async fn filter_products(
        &self,
        params: &HashMap<String, String>,
    ) -> CatalogResult<FilterOutcome> {
        let query = ProductQuery::from_params(params)?;

        let found: Vec<ProductResponse> = match &query {
            ProductQuery::Title(_) => self
                .products
                .search_by_title(&query.pattern())
                .await?
                .into_iter()
                .map(ProductResponse::unresolved)
                .collect(),
            ProductQuery::CategoryName(_) => {
                let matches = self.categories.search_by_name(&query.pattern()).await?;
                let ids: Vec<ObjectId> = matches.iter().map(|c| c.id).collect();
                let index: HashMap<ObjectId, Category> =
                    matches.into_iter().map(|c| (c.id, c)).collect();

                self.products
                    .list_by_categories(ids)
                    .await?
                    .into_iter()
                    .filter_map(|p| {
                        let category = index.get(&p.category)?;
                        Some(ProductResponse::embedded(p, Some(category)))
                    })
                    .collect()
            }
        };

        tracing::debug!(term = %query.term(), hits = found.len(), "Product search finished");
        if found.is_empty() {
            Ok(FilterOutcome::Empty)
        } else {
            Ok(FilterOutcome::Found(found))
        }
    }

    async fn find(&self, id: &str) -> CatalogResult<Product> {
        let id = parse_id(id, Entity::Product)?;
        self.products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(Entity::Product))
    }

    async fn ensure_category_exists(&self, category: ObjectId) -> CatalogResult<()> {
        if self.categories.get_by_id(category).await?.is_none() {
            return Err(CatalogError::Validation(FieldErrors::single(
                Field::Category,
                CATEGORY_MISSING,
            )));
        }
        Ok(())
    }

    async fn category_index(
        &self,
        ids: Vec<ObjectId>,
    ) -> CatalogResult<HashMap<ObjectId, Category>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let categories = self.categories.get_many(ids).await?;
        Ok(categories.into_iter().map(|c| (c.id, c)).collect())
    }
}

impl<P: ProductRepository, C: CategoryRepository> Clone for ProductService<P, C> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            categories: Arc::clone(&self.categories),
        }
    }
}
