//! # Axum Helpers
//!
//! Shared building blocks for the catalog HTTP service.
//!
//! - **[`errors`]**: `AppError`, the `{code, error, errors}` envelope, error codes
//! - **[`extractors`]**: `JsonBody`, a JSON extractor rejecting in the envelope
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly, health checks, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal, with_trailing_slash_support,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorDetails, ErrorResponse};

pub use extractors::JsonBody;
