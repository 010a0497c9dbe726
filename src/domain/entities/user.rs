//! User entity representing an account that owns short links.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new user.
///
/// The identifier is chosen by the caller so seeded fixtures can reference
/// each other with stable ids.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl NewUser {
    /// Creates user input with a fresh random identifier.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
        }
    }
}
