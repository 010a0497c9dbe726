//! Repository trait for recorded visits.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for visits.
///
/// Visits are append-only; they disappear only when their short link is
/// deleted (cascade).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the short link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    async fn count_for_short_link(&self, short_link_id: Uuid) -> Result<i64, AppError>;
}
