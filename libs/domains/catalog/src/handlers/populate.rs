//! HTTP handler for `/populate`

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use axum_helpers::errors::responses::InternalServerErrorResponse;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::error::CatalogResult;
use crate::repository::{CategoryRepository, ProductRepository};
use crate::seed::{SeedService, SeedSummary, IMPORTED};

/// OpenAPI documentation for the sample-data endpoint
#[derive(OpenApi)]
#[openapi(
    paths(populate),
    components(schemas(PopulateResponse), responses(InternalServerErrorResponse)),
    tags((name = "Populate", description = "Sample data loading"))
)]
pub struct PopulateApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct PopulateResponse {
    #[schema(example = "Data successfully imported.")]
    pub message: String,
    /// Categories inserted
    pub categories: usize,
    /// Products inserted
    pub products: usize,
}

impl From<SeedSummary> for PopulateResponse {
    fn from(summary: SeedSummary) -> Self {
        Self {
            message: IMPORTED.to_string(),
            categories: summary.categories,
            products: summary.products,
        }
    }
}

pub fn router<C, P>(service: SeedService<C, P>) -> Router
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/", post(populate))
        .with_state(Arc::new(service))
}

/// Insert the bundled sample categories and products
///
/// Not idempotent: every call adds another copy.
#[utoipa::path(
    post,
    path = "",
    tag = "Populate",
    responses(
        (status = 200, description = "Sample data inserted", body = PopulateResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn populate<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<SeedService<C, P>>>,
) -> CatalogResult<Json<PopulateResponse>> {
    let summary = service.populate().await?;
    Ok(Json(summary.into()))
}
