//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::domain::listing::{ListQuery, UserSort};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for users.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Returns the identifiers of every stored user.
    async fn list_ids(&self) -> Result<Vec<Uuid>, AppError>;

    /// Fetches one page filtered on `username`.
    async fn list(&self, query: &ListQuery<UserSort>) -> Result<Vec<User>, AppError>;

    async fn count_matching(&self, query: &ListQuery<UserSort>) -> Result<i64, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Sets or clears the banned flag. Returns `Ok(None)` if no user has this id.
    async fn set_banned(&self, id: Uuid, banned: bool) -> Result<Option<User>, AppError>;

    /// Replaces username and email. Returns `Ok(None)` if no user has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new username or email is taken.
    async fn update(
        &self,
        id: Uuid,
        username: String,
        email: String,
    ) -> Result<Option<User>, AppError>;

    /// Deletes a user together with their short links and those links' visits.
    /// Returns `Ok(false)` if no user has this id.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
