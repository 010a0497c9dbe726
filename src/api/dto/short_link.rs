//! DTOs for short link administration.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Short codes end up in URLs, so they are limited to URL-safe characters.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("short code pattern compiles"));

#[derive(Debug, Serialize)]
pub struct ShortLinkItem {
    pub id: Uuid,
    pub short_code: String,
    pub target_url: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShortLink> for ShortLinkItem {
    fn from(l: ShortLink) -> Self {
        Self {
            id: l.id,
            short_code: l.short_code,
            target_url: l.target_url,
            user_id: l.user_id,
            expires_at: l.expires_at,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Request to create a short link.
///
/// `user_id` is taken as a string so a malformed id is reported as a
/// validation error instead of a body deserialisation failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortLinkRequest {
    #[validate(length(min = 3, max = 255))]
    #[validate(regex(path = "*SHORT_CODE_REGEX", message = "Only letters, digits, '-' and '_'"))]
    pub short_code: String,

    #[validate(url(message = "Invalid URL format"), length(min = 3, max = 255))]
    pub target_url: String,

    pub user_id: String,

    pub expires_at: DateTime<Utc>,
}

/// Request to edit a short link. The expiry cannot be changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateShortLinkRequest {
    #[validate(length(min = 3, max = 255))]
    #[validate(regex(path = "*SHORT_CODE_REGEX", message = "Only letters, digits, '-' and '_'"))]
    pub short_code: String,

    #[validate(url(message = "Invalid URL format"), length(min = 3, max = 255))]
    pub target_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_validation() {
        let ok = UpdateShortLinkRequest {
            short_code: "promo-2025".to_string(),
            target_url: "https://example.com/sale".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_code = UpdateShortLinkRequest {
            short_code: "no spaces".to_string(),
            target_url: "https://example.com".to_string(),
        };
        assert!(bad_code.validate().is_err());

        let bad_url = UpdateShortLinkRequest {
            short_code: "promo".to_string(),
            target_url: "example".to_string(),
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_create_request_deserializes_rfc3339_expiry() {
        let req: CreateShortLinkRequest = serde_json::from_str(
            r#"{"short_code":"promo","target_url":"https://example.com","user_id":"x","expires_at":"2030-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(req.expires_at.to_rfc3339(), "2030-01-01T00:00:00+00:00");
    }
}
