//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink, ShortLinkPatch};
use crate::domain::listing::{ListQuery, ShortLinkSort};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository interface for short links.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`; `Err` is reserved for
/// store failures.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortLink>, AppError>;

    /// Returns the identifiers of every stored link.
    async fn list_ids(&self) -> Result<Vec<Uuid>, AppError>;

    /// Fetches one page: search filter on `short_code`, then ordering,
    /// offset and limit from `query`.
    async fn list(&self, query: &ListQuery<ShortLinkSort>) -> Result<Vec<ShortLink>, AppError>;

    /// Counts links matching the search filter of `query`. Ordering and
    /// paging are ignored.
    async fn count_matching(&self, query: &ListQuery<ShortLinkSort>) -> Result<i64, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Returns links whose expiry instant is strictly before `now`.
    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<ShortLink>, AppError>;

    /// Updates the short code and target URL. The expiry is left untouched.
    ///
    /// Returns `Ok(None)` if no link has this id.
    async fn update(&self, id: Uuid, patch: ShortLinkPatch)
    -> Result<Option<ShortLink>, AppError>;

    /// Deletes a link. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
