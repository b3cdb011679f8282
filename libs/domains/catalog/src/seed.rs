//! Sample data loader
//!
//! Inserts the bundled fixture categories, then the fixture products with
//! each one pointing at a randomly chosen inserted category. Every call
//! inserts a fresh copy.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Product};
use crate::repository::{CategoryRepository, ProductRepository};

const CATEGORIES_JSON: &str = include_str!("../seed/categories.json");
const PRODUCTS_JSON: &str = include_str!("../seed/products.json");

pub const IMPORTED: &str = "Data successfully imported.";

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFixture {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixture {
    pub title: String,
    pub description: String,
    pub price: f64,
}

/// Parsed fixture files
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub categories: Vec<CategoryFixture>,
    pub products: Vec<ProductFixture>,
}

impl Fixtures {
    /// The fixtures compiled into the binary.
    pub fn bundled() -> CatalogResult<Self> {
        Self::parse(CATEGORIES_JSON, PRODUCTS_JSON)
    }

    pub fn parse(categories: &str, products: &str) -> CatalogResult<Self> {
        let categories = serde_json::from_str(categories)
            .map_err(|e| CatalogError::Internal(format!("malformed category fixtures: {e}")))?;
        let products = serde_json::from_str(products)
            .map_err(|e| CatalogError::Internal(format!("malformed product fixtures: {e}")))?;
        Ok(Self {
            categories,
            products,
        })
    }
}

/// Counts reported after a populate run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
}

pub struct SeedService<C: CategoryRepository, P: ProductRepository> {
    categories: Arc<C>,
    products: Arc<P>,
    fixtures: Option<Fixtures>,
}

impl<C: CategoryRepository, P: ProductRepository> SeedService<C, P> {
    /// Seed from the bundled fixtures.
    pub fn new(categories: Arc<C>, products: Arc<P>) -> Self {
        Self {
            categories,
            products,
            fixtures: None,
        }
    }

    pub fn with_fixtures(categories: Arc<C>, products: Arc<P>, fixtures: Fixtures) -> Self {
        Self {
            categories,
            products,
            fixtures: Some(fixtures),
        }
    }

    #[instrument(skip(self))]
    pub async fn populate(&self) -> CatalogResult<SeedSummary> {
        let fixtures = match &self.fixtures {
            Some(fixtures) => fixtures.clone(),
            None => Fixtures::bundled()?,
        };

        let categories: Vec<Category> = fixtures
            .categories
            .into_iter()
            .map(|c| Category::new(c.name))
            .collect();
        let ids: Vec<ObjectId> = categories.iter().map(|c| c.id).collect();
        if ids.is_empty() {
            return Err(CatalogError::Internal(
                "category fixtures are empty; products cannot be assigned".to_string(),
            ));
        }

        let products = assign_categories(fixtures.products, &ids)?;

        let inserted_categories = self.categories.insert_many(categories).await?;
        let inserted_products = self.products.insert_many(products).await?;

        tracing::info!(
            categories = inserted_categories,
            products = inserted_products,
            "Sample data imported"
        );
        Ok(SeedSummary {
            categories: inserted_categories,
            products: inserted_products,
        })
    }
}

/// Build products, each referencing a uniformly random id from `categories`.
fn assign_categories(
    fixtures: Vec<ProductFixture>,
    categories: &[ObjectId],
) -> CatalogResult<Vec<Product>> {
    let mut rng = rand::rng();
    fixtures
        .into_iter()
        .map(|p| {
            let category = categories
                .choose(&mut rng)
                .copied()
                .ok_or_else(|| CatalogError::Internal("no category to assign".to_string()))?;
            Ok(Product::new(p.title, p.description, p.price, category))
        })
        .collect()
}

impl<C: CategoryRepository, P: ProductRepository> Clone for SeedService<C, P> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            products: Arc::clone(&self.products),
            fixtures: self.fixtures.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::repository::{MockCategoryRepository, MockProductRepository};

    #[test]
    fn test_bundled_fixtures_parse() {
        let fixtures = Fixtures::bundled().unwrap();

        assert!(!fixtures.categories.is_empty());
        assert!(!fixtures.products.is_empty());
        assert!(fixtures.products.iter().all(|p| p.price >= 1.0));
    }

    #[test]
    fn test_malformed_fixtures_are_internal_errors() {
        let err = Fixtures::parse("{", "[]").unwrap_err();
        assert!(matches!(err, CatalogError::Internal(_)));
    }

    #[test]
    fn test_every_product_gets_one_of_the_categories() {
        let ids = vec![ObjectId::new(), ObjectId::new()];
        let fixtures = (0..20)
            .map(|i| ProductFixture {
                title: format!("p{i}"),
                description: "d".to_string(),
                price: 2.0,
            })
            .collect();

        let products = assign_categories(fixtures, &ids).unwrap();

        assert_eq!(products.len(), 20);
        assert!(products.iter().all(|p| ids.contains(&p.category)));
    }

    #[tokio::test]
    async fn test_populate_links_products_to_inserted_categories() {
        let seen = Arc::new(Mutex::new(Vec::<ObjectId>::new()));

        let mut categories = MockCategoryRepository::new();
        let recorder = Arc::clone(&seen);
        categories
            .expect_insert_many()
            .times(1)
            .returning(move |batch| {
                recorder
                    .lock()
                    .unwrap()
                    .extend(batch.iter().map(|c| c.id));
                Ok(batch.len())
            });

        let mut products = MockProductRepository::new();
        let inserted = Arc::clone(&seen);
        products
            .expect_insert_many()
            .times(1)
            .withf(move |batch| {
                let ids = inserted.lock().unwrap();
                batch.iter().all(|p| ids.contains(&p.category))
            })
            .returning(|batch| Ok(batch.len()));

        let fixtures = Fixtures::parse(
            r#"[{"name":"Tools"},{"name":"Garden"}]"#,
            r#"[{"title":"Hammer","description":"steel","price":10},
                {"title":"Rake","description":"wood","price":15},
                {"title":"Saw","description":"steel","price":20}]"#,
        )
        .unwrap();

        let summary = SeedService::with_fixtures(Arc::new(categories), Arc::new(products), fixtures)
            .populate()
            .await
            .unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                categories: 2,
                products: 3
            }
        );
    }

    #[tokio::test]
    async fn test_populate_without_categories_fails_before_store() {
        let fixtures = Fixtures::parse("[]", r#"[{"title":"x","description":"y","price":2}]"#)
            .unwrap();

        let err = SeedService::with_fixtures(
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockProductRepository::new()),
            fixtures,
        )
        .populate()
        .await
        .unwrap_err();

        assert!(matches!(err, CatalogError::Internal(_)));
    }
}
