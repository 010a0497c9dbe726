//! Handlers for user administration.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use super::parse_id;
use crate::api::dto::count::CountResponse;
use crate::api::dto::pagination::ListParams;
use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserItem};
use crate::domain::listing::{Page, UserSort};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/admin/users`
///
/// Search matches `username`. Sortable by `username`, `email`, `created_at`.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<UserItem>>, AppError> {
    let query = params.into_query::<UserSort>(&state.page_limits)?;
    let page = state.user_service.list_users(query).await?;

    Ok(Json(page.map(UserItem::from)))
}

/// `POST /api/admin/users`
///
/// # Errors
///
/// Returns 400 if validation fails.
/// Returns 409 if the username or email is taken.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserItem>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .create_user(payload.username, payload.email)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `GET /api/admin/users/{id}`
pub async fn get_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserItem>, AppError> {
    let id = parse_id(&id)?;
    let user = state.user_service.get_user(id).await?;

    Ok(Json(user.into()))
}

/// `PUT /api/admin/users/{id}`
///
/// # Errors
///
/// Returns 400 if validation fails.
/// Returns 404 if the user does not exist.
/// Returns 409 if the new username or email is taken.
pub async fn update_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserItem>, AppError> {
    let id = parse_id(&id)?;
    payload.validate()?;

    let user = state
        .user_service
        .update_user(id, payload.username, payload.email)
        .await?;

    Ok(Json(user.into()))
}

/// `DELETE /api/admin/users/{id}`
///
/// Also removes the user's short links and their visits.
pub async fn delete_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/admin/users/{id}/ban`
pub async fn ban_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserItem>, AppError> {
    let id = parse_id(&id)?;
    let user = state.user_service.ban_user(id).await?;

    Ok(Json(user.into()))
}

/// `DELETE /api/admin/users/{id}/ban`
pub async fn unban_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserItem>, AppError> {
    let id = parse_id(&id)?;
    let user = state.user_service.unban_user(id).await?;

    Ok(Json(user.into()))
}

/// `GET /api/admin/users/count`
pub async fn count_users_handler(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.user_service.count_users().await?;
    Ok(Json(CountResponse { count }))
}
