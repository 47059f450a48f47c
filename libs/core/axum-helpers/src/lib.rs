//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly with OpenAPI viewers, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: `AppError` and the uniform `ErrorResponse` body with error codes
//! - **[`extractors`]**: UUID path, validated JSON and query extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new()).await?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{cors_layer, parse_allowed_origins, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{QueryParams, UuidPath, ValidatedJson};
