//! Handlers for banned domain administration.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use super::parse_id;
use crate::api::dto::banned_domain::{BannedDomainItem, BannedDomainRequest};
use crate::api::dto::pagination::ListParams;
use crate::domain::listing::{BannedDomainSort, Page};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/admin/banned-domains`
///
/// Search matches `url`. Sortable by `url` and `created_at`.
pub async fn list_banned_domains_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<BannedDomainItem>>, AppError> {
    let query = params.into_query::<BannedDomainSort>(&state.page_limits)?;
    let page = state.banned_domain_service.list_banned_domains(query).await?;

    Ok(Json(page.map(BannedDomainItem::from)))
}

/// `POST /api/admin/banned-domains`
pub async fn create_banned_domain_handler(
    State(state): State<AppState>,
    Json(payload): Json<BannedDomainRequest>,
) -> Result<(StatusCode, Json<BannedDomainItem>), AppError> {
    payload.validate()?;

    let entry = state
        .banned_domain_service
        .create_banned_domain(payload.url)
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// `PUT /api/admin/banned-domains/{id}`
pub async fn update_banned_domain_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<BannedDomainRequest>,
) -> Result<Json<BannedDomainItem>, AppError> {
    let id = parse_id(&id)?;
    payload.validate()?;

    let entry = state
        .banned_domain_service
        .update_banned_domain(id, payload.url)
        .await?;

    Ok(Json(entry.into()))
}

/// `DELETE /api/admin/banned-domains/{id}`
pub async fn delete_banned_domain_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.banned_domain_service.delete_banned_domain(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
