//! Catalog Domain
//!
//! Categories and the products that reference them, stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/category, /product, /populate)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← id checks, validation, delete guard, filter, seeding
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Documents, payloads, responses
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_catalog::{
//!     handlers, CategoryService, MongoCategoryRepository, MongoProductRepository,
//!     ProductService, SeedService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let categories = Arc::new(MongoCategoryRepository::new(&db));
//! let products = Arc::new(MongoProductRepository::new(&db));
//!
//! let app = axum::Router::new()
//!     .nest(
//!         "/category",
//!         handlers::categories::router(CategoryService::new(categories.clone(), products.clone())),
//!     )
//!     .nest(
//!         "/product",
//!         handlers::products::router(ProductService::new(products.clone(), categories.clone())),
//!     )
//!     .nest(
//!         "/populate",
//!         handlers::populate::router(SeedService::new(categories, products)),
//!     );
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod ids;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult, Entity};
pub use handlers::{CategoryApiDoc, PopulateApiDoc, ProductApiDoc};
pub use models::{
    Category, CategoryRef, CategoryResponse, CategorySummary, CreateCategory, CreateProduct,
    Field, FieldErrors, MessageResponse, Product, ProductResponse, UpdateCategory, UpdateProduct,
};
pub use crate::mongodb::{MongoCategoryRepository, MongoProductRepository};
pub use query::ProductQuery;
pub use repository::{CategoryRepository, ProductRepository};
pub use seed::{Fixtures, SeedService, SeedSummary};
pub use service::{CategoryService, FilterOutcome, ProductService};
