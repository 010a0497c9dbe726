//! Handlers for visit counters.

use axum::{
    Json,
    extract::{Path, State},
};

use super::parse_id;
use crate::api::dto::count::CountResponse;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/admin/visits/count`
pub async fn count_visits_handler(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.visit_service.count_visits().await?;
    Ok(Json(CountResponse { count }))
}

/// `GET /api/admin/visits/{short_link_id}/count`
///
/// # Errors
///
/// Returns 404 if the short link does not exist.
pub async fn count_link_visits_handler(
    Path(short_link_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let short_link_id = parse_id(&short_link_id)?;
    let count = state.visit_service.count_visits_for(short_link_id).await?;
    Ok(Json(CountResponse { count }))
}
