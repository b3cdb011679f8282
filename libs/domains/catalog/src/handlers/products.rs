//! HTTP handlers for the `/product` resource

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdentifierResponse, BadRequestResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    AppError, JsonBody,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::error::{CatalogError, CatalogResult, Entity};
use crate::ids::parse_id;
use crate::models::{
    CategoryRef, CategorySummary, CreateProduct, MessageResponse, ProductResponse, UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::{FilterOutcome, ProductService, NO_PRODUCTS_FOUND};

/// OpenAPI documentation for the products endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        filter_products,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            ProductResponse, CategoryRef, CategorySummary, CreateProduct, UpdateProduct,
            MessageResponse, FilterResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestIdentifierResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management and search endpoints")
    )
)]
pub struct ProductApiDoc;

/// Query string for `/product/filter`; `title` wins when both are given
///
/// Unknown keys are kept so the search can name them in its error.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterParams {
    /// Case-insensitive substring of the product title
    pub title: Option<String>,
    /// Case-insensitive substring of the category name
    pub category: Option<String>,
    #[serde(flatten)]
    #[param(ignore)]
    pub other: HashMap<String, String>,
}

impl FilterParams {
    fn into_map(self) -> HashMap<String, String> {
        let mut params = self.other;
        if let Some(title) = self.title {
            params.insert("title".to_string(), title);
        }
        if let Some(category) = self.category {
            params.insert("category".to_string(), category);
        }
        params
    }
}

/// Search result: matching products, or a message when nothing matched
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum FilterResponse {
    Found { products: Vec<ProductResponse> },
    Empty(MessageResponse),
}

impl From<FilterOutcome> for FilterResponse {
    fn from(outcome: FilterOutcome) -> Self {
        match outcome {
            FilterOutcome::Found(products) => Self::Found { products },
            FilterOutcome::Empty => Self::Empty(MessageResponse::new(NO_PRODUCTS_FOUND)),
        }
    }
}

type Service<P, C> = State<Arc<ProductService<P, C>>>;

/// Create the products router
pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .put(missing_id)
                .delete(missing_id),
        )
        .route("/filter", get(filter_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products with their category resolved to `{id, name}`
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "Every product", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): Service<P, C>,
) -> CatalogResult<Json<Vec<ProductResponse>>> {
    Ok(Json(service.list_products().await?))
}

/// Create a product in an existing category
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, C: CategoryRepository>(
    State(service): Service<P, C>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> CatalogResult<impl IntoResponse> {
    let input = CreateProduct::from_json(body).map_err(CatalogError::Validation)?;
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Search products by title or by category name
#[utoipa::path(
    get,
    path = "/filter",
    tag = "Products",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching products, or a message when none match", body = FilterResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_products<P: ProductRepository, C: CategoryRepository>(
    State(service): Service<P, C>,
    Query(params): Query<FilterParams>,
) -> CatalogResult<Json<FilterResponse>> {
    let outcome = service.filter_products(&params.into_map()).await?;
    Ok(Json(outcome.into()))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID (24 hex digits)")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, C: CategoryRepository>(
    State(service): Service<P, C>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ProductResponse>> {
    Ok(Json(service.get_product(&id).await?))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID (24 hex digits)")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): Service<P, C>,
    Path(id): Path<String>,
    body: Result<JsonBody<Map<String, Value>>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    parse_id(&id, Entity::Product)?;
    let JsonBody(body) = body?;
    let input = UpdateProduct::from_json(body).map_err(CatalogError::Validation)?;
    Ok(Json(service.update_product(&id, input).await?))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID (24 hex digits)")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, C: CategoryRepository>(
    State(service): Service<P, C>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageResponse>> {
    Ok(Json(service.delete_product(&id).await?))
}

async fn missing_id() -> CatalogError {
    CatalogError::MissingId
}
