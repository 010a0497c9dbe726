//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: database and expiry sweeper
//! - `/api/admin/*`      - Admin REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the admin API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Per-IP limits applied to the admin API.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst: u32,
}

/// Constructs the application router with all routes and middleware.
///
/// `limits` of `None` leaves the admin API unthrottled, which also lifts
/// the requirement for peer address info on each request.
///
/// # Errors
///
/// Returns an error if the rate limit values are invalid.
pub fn app_router(
    state: AppState,
    limits: Option<RateLimit>,
) -> anyhow::Result<NormalizePath<Router>> {
    let mut admin_router = api::routes::admin_routes();
    if let Some(limit) = limits {
        admin_router = admin_router.layer(rate_limit::layer(limit.per_second, limit.burst)?);
    }

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api/admin", admin_router)
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
