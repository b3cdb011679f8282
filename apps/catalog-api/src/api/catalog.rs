//! Catalog routes: categories, products and sample data

use std::sync::Arc;

use axum::Router;
use domain_catalog::{
    handlers, CategoryService, MongoCategoryRepository, MongoProductRepository, ProductService,
    SeedService,
};

use crate::state::AppState;

/// Nest the three catalog routers under their resource paths
pub fn router(state: &AppState) -> Router {
    let categories = Arc::new(MongoCategoryRepository::new(&state.db));
    let products = Arc::new(MongoProductRepository::new(&state.db));

    Router::new()
        .nest(
            "/category",
            handlers::categories::router(CategoryService::new(
                categories.clone(),
                products.clone(),
            )),
        )
        .nest(
            "/product",
            handlers::products::router(ProductService::new(products.clone(), categories.clone())),
        )
        .nest(
            "/populate",
            handlers::populate::router(SeedService::new(categories, products)),
        )
}

/// Initialize catalog indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoProductRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
