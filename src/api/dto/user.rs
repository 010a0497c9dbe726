//! DTOs for user administration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::User;

#[derive(Debug, Serialize)]
pub struct UserItem {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserItem {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            is_banned: u.is_banned,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 255))]
    pub username: String,

    #[validate(email(message = "Invalid email address"), length(max = 255))]
    pub email: String,
}

/// Full replacement of the editable user fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 255))]
    pub username: String,

    #[validate(email(message = "Invalid email address"), length(max = 255))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let ok = CreateUserRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = CreateUserRequest {
            username: "al".to_string(),
            email: "not-an-email".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_update_user_validation() {
        let bad = UpdateUserRequest {
            username: "bob".to_string(),
            email: "bob-at-example".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(!errors.field_errors().contains_key("username"));
    }
}
