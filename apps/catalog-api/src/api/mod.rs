//! API routes module

pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(catalog::router(state))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    catalog::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // The driver connects lazily, so requests that never reach the store
    // can be served without a running MongoDB.
    async fn state() -> AppState {
        let mongodb = MongoConfig::with_database("mongodb://127.0.0.1:1", "catalog_test");
        let mongo_client = mongodb::Client::with_uri_str(mongodb.url()).await.unwrap();
        let db = mongo_client.database(mongodb.database());
        AppState {
            config: Config {
                app: app_info!(),
                mongodb,
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            mongo_client,
            db,
        }
    }

    #[tokio::test]
    async fn test_invalid_ids_are_answered_without_store() {
        let app = routes(&state().await);

        for uri in ["/category/123", "/product/not-an-id"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_filter_errors_are_answered_without_store() {
        let response = routes(&state().await)
            .oneshot(
                Request::builder()
                    .uri("/product/filter?sort=asc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["errors"][0],
            "Wrong parameter. The parameter must be title or category."
        );
    }
}
