//! DTOs for banned domain administration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::BannedDomain;

#[derive(Debug, Serialize)]
pub struct BannedDomainItem {
    pub id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BannedDomain> for BannedDomainItem {
    fn from(d: BannedDomain) -> Self {
        Self {
            id: d.id,
            url: d.url,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Body of both create and update. Accepts a full URL or a bare host.
#[derive(Debug, Deserialize, Validate)]
pub struct BannedDomainRequest {
    #[validate(length(min = 3, max = 255))]
    pub url: String,
}
