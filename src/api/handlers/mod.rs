//! HTTP request handlers for API endpoints.
//!
//! Handlers are thin: they parse and validate input, call one service
//! operation and map the result to a DTO.

pub mod banned_domains;
pub mod health;
pub mod short_links;
pub mod users;
pub mod visits;

pub use banned_domains::{
    create_banned_domain_handler, delete_banned_domain_handler, list_banned_domains_handler,
    update_banned_domain_handler,
};
pub use health::health_handler;
pub use short_links::{
    count_short_links_handler, create_short_link_handler, delete_short_link_handler,
    get_short_link_handler, list_short_links_handler, update_short_link_handler,
};
pub use users::{
    ban_user_handler, count_users_handler, create_user_handler, delete_user_handler,
    get_user_handler, list_users_handler, unban_user_handler, update_user_handler,
};
pub use visits::{count_link_visits_handler, count_visits_handler};

use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;

/// Parses an identifier from a path or body, rejecting malformed input
/// before any data access.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request("Invalid identifier", json!({ "id": raw })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("not-a-uuid").unwrap_err(),
            AppError::Validation { .. }
        ));
    }
}
