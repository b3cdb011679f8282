use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, ServiceExt, extract::Request, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Combines the API routes with documentation UIs and cross-cutting middleware.
///
/// Mounted alongside `apis`:
/// - `/api-docs/openapi.json` plus RapiDoc at `/rapidoc`
/// - ReDoc at `/redoc` and Scalar at `/scalar`
///
/// Middleware: request tracing, security headers, response compression, and a
/// CORS layer when `cors_allowed_origins` is non-empty. Unknown routes and
/// unsupported methods answer in the standard error envelope.
///
/// Routes are mounted at the root; domain routers apply their own state.
///
/// ```ignore
/// let router = create_router::<ApiDoc>(api_routes, &server_config.cors_allowed_origins);
/// ```
pub fn create_router<T>(apis: Router, cors_allowed_origins: &[String]) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};

    let mut router = Router::new()
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", T::openapi()).path("/rapidoc"))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    match create_cors_layer(cors_allowed_origins) {
        Some(cors) => {
            info!(origins = ?cors_allowed_origins, "CORS enabled");
            router = router.layer(cors);
        }
        None => info!("CORS_ALLOWED_ORIGIN not set, CORS layer disabled"),
    }

    router.layer(CompressionLayer::new())
}

/// Wraps the router so `/category/` and `/category` reach the same route.
///
/// Path normalization has to run before routing, so it wraps the finished
/// router instead of being added with `Router::layer`.
pub fn with_trailing_slash_support(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup` within
/// `shutdown_timeout`.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
///
/// ```ignore
/// let cleanup = async move { client.shutdown().await };
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();
    let signal_handle = coordinator.clone();
    let cleanup_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let cleanup_task = tokio::spawn(async move {
        cleanup_handle.wait().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let app = with_trailing_slash_support(router);
    let serve_result = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(async move { coordinator.wait().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_task.await.ok();

    serve_result
}
