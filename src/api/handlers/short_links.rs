//! Handlers for short link administration.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use super::parse_id;
use crate::api::dto::count::CountResponse;
use crate::api::dto::pagination::ListParams;
use crate::api::dto::short_link::{
    CreateShortLinkRequest, ShortLinkItem, UpdateShortLinkRequest,
};
use crate::domain::listing::{Page, ShortLinkSort};
use crate::error::AppError;
use crate::state::AppState;

/// Lists short links.
///
/// # Endpoint
///
/// `GET /api/admin/short-links?search=&sort_by=&sort_order=&page=&page_size=`
///
/// Search is a case-sensitive substring match on `short_code`. Sortable by
/// `short_code`, `target_url` and `created_at` (default).
///
/// # Errors
///
/// Returns 400 for an unknown `sort_by`.
/// Returns 504 if the listing does not finish in time.
pub async fn list_short_links_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<ShortLinkItem>>, AppError> {
    let query = params.into_query::<ShortLinkSort>(&state.page_limits)?;
    let page = state.short_link_service.list_short_links(query).await?;

    Ok(Json(page.map(ShortLinkItem::from)))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/admin/short-links`
///
/// # Errors
///
/// Returns 400 if validation fails, the expiry is in the past, or the
/// target's domain is banned.
/// Returns 404 if the owning user does not exist.
pub async fn create_short_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateShortLinkRequest>,
) -> Result<(StatusCode, Json<ShortLinkItem>), AppError> {
    payload.validate()?;
    let user_id = parse_id(&payload.user_id)?;

    let link = state
        .short_link_service
        .create_short_link(
            payload.short_code,
            payload.target_url,
            user_id,
            payload.expires_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// `GET /api/admin/short-links/{id}`
pub async fn get_short_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortLinkItem>, AppError> {
    let id = parse_id(&id)?;
    let link = state.short_link_service.get_short_link(id).await?;

    Ok(Json(link.into()))
}

/// Replaces short code and target URL.
///
/// # Endpoint
///
/// `PUT /api/admin/short-links/{id}`
pub async fn update_short_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateShortLinkRequest>,
) -> Result<Json<ShortLinkItem>, AppError> {
    let id = parse_id(&id)?;
    payload.validate()?;

    let link = state
        .short_link_service
        .update_short_link(id, payload.short_code, payload.target_url)
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a short link and its visits.
///
/// # Endpoint
///
/// `DELETE /api/admin/short-links/{id}`
pub async fn delete_short_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.short_link_service.delete_short_link(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/admin/short-links/count`
pub async fn count_short_links_handler(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.short_link_service.count_short_links().await?;
    Ok(Json(CountResponse { count }))
}
