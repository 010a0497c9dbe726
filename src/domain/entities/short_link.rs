//! Short link entity mapping a short code to a target URL.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A shortened URL owned by a user.
///
/// `expires_at` is fixed when the link is created. Updates never move it;
/// once it has passed, the expiry sweeper removes the link.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub id: Uuid,
    pub short_code: String,
    pub target_url: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortLink {
    /// Returns true if the link's expiry instant lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub id: Uuid,
    pub short_code: String,
    pub target_url: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Fields an admin may change on an existing link.
#[derive(Debug, Clone)]
pub struct ShortLinkPatch {
    pub short_code: String,
    pub target_url: String,
}
