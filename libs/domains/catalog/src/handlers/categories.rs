//! HTTP handlers for the `/category` resource

use std::sync::Arc;

use axum::{
    extract::{Path, State},
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
use serde_json::{Map, Value};
use utoipa::OpenApi;

use crate::error::{CatalogError, CatalogResult, Entity};
use crate::ids::parse_id;
use crate::models::{CategoryResponse, CreateCategory, MessageResponse, UpdateCategory};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::CategoryService;

/// OpenAPI documentation for the categories endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(CategoryResponse, CreateCategory, UpdateCategory, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestIdentifierResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Category management endpoints")
    )
)]
pub struct CategoryApiDoc;

type Service<C, P> = State<Arc<CategoryService<C, P>>>;

/// Create the categories router
pub fn router<C, P>(service: CategoryService<C, P>) -> Router
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_categories)
                .post(create_category)
                .put(missing_id)
                .delete(missing_id),
        )
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(shared_service)
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    responses(
        (status = 200, description = "Every category", body = Vec<CategoryResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<C: CategoryRepository, P: ProductRepository>(
    State(service): Service<C, P>,
) -> CatalogResult<Json<Vec<CategoryResponse>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<C: CategoryRepository, P: ProductRepository>(
    State(service): Service<C, P>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> CatalogResult<impl IntoResponse> {
    let input = CreateCategory::from_json(body).map_err(CatalogError::Validation)?;
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ID (24 hex digits)")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<C: CategoryRepository, P: ProductRepository>(
    State(service): Service<C, P>,
    Path(id): Path<String>,
) -> CatalogResult<Json<CategoryResponse>> {
    let category = service.get_category(&id).await?;
    Ok(Json(category.into()))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ID (24 hex digits)")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<C: CategoryRepository, P: ProductRepository>(
    State(service): Service<C, P>,
    Path(id): Path<String>,
    body: Result<JsonBody<Map<String, Value>>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    parse_id(&id, Entity::Category)?;
    let JsonBody(body) = body?;
    let input = UpdateCategory::from_json(body).map_err(CatalogError::Validation)?;
    Ok(Json(service.update_category(&id, input).await?))
}

/// Delete a category that no product references
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ID (24 hex digits)")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<C: CategoryRepository, P: ProductRepository>(
    State(service): Service<C, P>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageResponse>> {
    Ok(Json(service.delete_category(&id).await?))
}

/// `PUT` or `DELETE` on the collection path.
async fn missing_id() -> CatalogError {
    CatalogError::MissingId
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::repository::{MockCategoryRepository, MockProductRepository};
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use mongodb::bson::oid::ObjectId;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(categories: MockCategoryRepository, products: MockProductRepository) -> Router {
        router(CategoryService::new(Arc::new(categories), Arc::new(products)))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_201_with_record() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_insert().returning(Ok);

        let response = app(categories, MockProductRepository::new())
            .oneshot(json_request("POST", "/", r#"{"name":"Tools"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Tools");
        assert_eq!(body["id"].as_str().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_create_without_name_is_field_error() {
        let response = app(MockCategoryRepository::new(), MockProductRepository::new())
            .oneshot(json_request("POST", "/", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["errors"]["name"], "Category name is required.");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app(MockCategoryRepository::new(), MockProductRepository::new())
            .oneshot(json_request("POST", "/", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "JSON_EXTRACTION");
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_invalid_id_is_rejected() {
        let response = app(MockCategoryRepository::new(), MockProductRepository::new())
            .oneshot(
                Request::builder()
                    .uri("/123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0], "Category ID is invalid.");
    }

    #[tokio::test]
    async fn test_create_without_body_is_field_error() {
        let response = app(MockCategoryRepository::new(), MockProductRepository::new())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"]["name"], "Category name is required.");
    }

    #[tokio::test]
    async fn test_create_with_nested_name_is_field_error() {
        let response = app(MockCategoryRepository::new(), MockProductRepository::new())
            .oneshot(json_request("POST", "/", r#"{"name":{"en":"Tools"}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["errors"]["name"], "Category name must be a string.");
    }

    #[tokio::test]
    async fn test_update_checks_id_before_body() {
        for body in ["", "{not json"] {
            let response = app(MockCategoryRepository::new(), MockProductRepository::new())
                .oneshot(
                    Request::builder()
                        .method("PUT")
                        .uri("/123")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["error"], "INVALID_IDENTIFIER");
            assert_eq!(body["errors"][0], "Category ID is invalid.");
        }
    }

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_get_by_id().returning(|_| Ok(None));

        let response = app(categories, MockProductRepository::new())
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", ObjectId::new().to_hex()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0], "Category does not exist.");
    }

    #[tokio::test]
    async fn test_delete_on_collection_path_is_missing_id() {
        let response = app(MockCategoryRepository::new(), MockProductRepository::new())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0], "Missing ID.");
    }

    #[tokio::test]
    async fn test_delete_guarded_category() {
        let tools = Category::new("Tools");
        let id = tools.id;

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .returning(move |_| Ok(Some(tools.clone())));
        categories.expect_delete().never();
        let mut products = MockProductRepository::new();
        products.expect_count_by_category().returning(|_| Ok(2));

        let response = app(categories, products)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", id.to_hex()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["errors"][0],
            "This category cannot be deleted because it has products attached."
        );
    }

    #[tokio::test]
    async fn test_update_confirms() {
        let tools = Category::new("Tools");
        let id = tools.id;

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .returning(move |_| Ok(Some(tools.clone())));
        categories.expect_replace().returning(|_| Ok(true));

        let response = app(categories, MockProductRepository::new())
            .oneshot(json_request(
                "PUT",
                &format!("/{}", id.to_hex()),
                r#"{"name":"Hand tools"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Category updated.");
    }

    #[tokio::test]
    async fn test_store_failure_hides_details() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list()
            .returning(|| Err(CatalogError::Database("auth failed for user admin".into())));

        let response = app(categories, MockProductRepository::new())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0], "Something went wrong.");
        assert!(!body.to_string().contains("admin"));
    }
}
