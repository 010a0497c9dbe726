//! User account service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use crate::application::deadline::{DEFAULT_OPERATION_TIMEOUT, with_deadline};
use crate::application::listing::fetch_page;
use crate::application::report;
use crate::domain::entities::{NewUser, User};
use crate::domain::listing::{ListQuery, Page, UserSort};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service for administering user accounts.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns one page of users, searched by username.
    pub async fn list_users(&self, query: ListQuery<UserSort>) -> Result<Page<User>, AppError> {
        let page = fetch_page(
            &query,
            self.repository.list(&query),
            self.repository.count_matching(&query),
        );

        with_deadline(self.timeout, "list_users", page)
            .await
            .map_err(report("user", "list", "Failed to retrieve users"))
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        with_deadline(self.timeout, "get_user", async {
            self.repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| user_not_found(id))
        })
        .await
        .map_err(report("user", "get", "Failed to retrieve user"))
    }

    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    pub async fn create_user(&self, username: String, email: String) -> Result<User, AppError> {
        let user = with_deadline(
            self.timeout,
            "create_user",
            self.repository.create(NewUser::new(username, email)),
        )
        .await
        .map_err(report("user", "create", "Failed to create user"))?;

        tracing::info!(id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Marks a user as banned.
    pub async fn ban_user(&self, id: Uuid) -> Result<User, AppError> {
        self.set_banned(id, true).await
    }

    /// Lifts a ban.
    pub async fn unban_user(&self, id: Uuid) -> Result<User, AppError> {
        self.set_banned(id, false).await
    }

    /// Replaces a user's username and email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    pub async fn update_user(
        &self,
        id: Uuid,
        username: String,
        email: String,
    ) -> Result<User, AppError> {
        let user = with_deadline(self.timeout, "update_user", async {
            self.repository
                .update(id, username, email)
                .await?
                .ok_or_else(|| user_not_found(id))
        })
        .await
        .map_err(report("user", "update", "Failed to update user"))?;

        tracing::info!(id = %user.id, username = %user.username, "User updated");
        Ok(user)
    }

    /// Deletes a user. Their short links and visits go with them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        with_deadline(self.timeout, "delete_user", async {
            if self.repository.delete(id).await? {
                Ok(())
            } else {
                Err(user_not_found(id))
            }
        })
        .await
        .map_err(report("user", "delete", "Failed to delete user"))?;

        tracing::info!(%id, "User deleted");
        Ok(())
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        with_deadline(self.timeout, "count_users", self.repository.count())
            .await
            .map_err(report("user", "count", "Failed to count users"))
    }

    async fn set_banned(&self, id: Uuid, banned: bool) -> Result<User, AppError> {
        let user = with_deadline(self.timeout, "set_user_banned", async {
            self.repository
                .set_banned(id, banned)
                .await?
                .ok_or_else(|| user_not_found(id))
        })
        .await
        .map_err(report("user", "ban", "Failed to update user"))?;

        tracing::info!(id = %user.id, banned, "User ban status changed");
        Ok(user)
    }
}

fn user_not_found(id: Uuid) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}
