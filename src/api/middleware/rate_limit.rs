//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type AdminRateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP rate limiter for the admin API.
///
/// Tokens refill at `per_second` and at most `burst` requests may be made
/// back to back. Requests over the limit receive `429 Too Many Requests`.
///
/// The client key is the socket peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if either value is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api/admin", admin_routes())
///     .layer(rate_limit::layer(5, 50)?);
/// ```
pub fn layer(per_second: u64, burst: u32) -> Result<AdminRateLimitLayer> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .context("Invalid rate limit: values must be greater than 0")?,
    );

    Ok(GovernorLayer::new(governor_conf))
}
