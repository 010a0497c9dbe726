//! Repository trait for banned domain entries.

use crate::domain::entities::{BannedDomain, NewBannedDomain};
use crate::domain::listing::{BannedDomainSort, ListQuery};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for banned domains.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBannedDomainRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BannedDomainRepository: Send + Sync {
    async fn create(&self, new_entry: NewBannedDomain) -> Result<BannedDomain, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BannedDomain>, AppError>;

    /// Returns every entry, unpaginated. Used to screen new link targets.
    async fn list_all(&self) -> Result<Vec<BannedDomain>, AppError>;

    /// Fetches one page filtered on `url`.
    async fn list(&self, query: &ListQuery<BannedDomainSort>)
    -> Result<Vec<BannedDomain>, AppError>;

    async fn count_matching(&self, query: &ListQuery<BannedDomainSort>) -> Result<i64, AppError>;

    /// Replaces the URL pattern. Returns `Ok(None)` if no entry has this id.
    async fn update(&self, id: Uuid, url: String) -> Result<Option<BannedDomain>, AppError>;

    /// Deletes an entry. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
