//! Banned domain entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A URL pattern marking a domain as disallowed for new short links.
#[derive(Debug, Clone)]
pub struct BannedDomain {
    pub id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BannedDomain {
    /// Returns the lowercase host this entry bans.
    ///
    /// Accepts both full URLs (`https://spam.example/path`) and bare hosts
    /// (`spam.example`).
    pub fn host(&self) -> Option<String> {
        Self::host_of(&self.url)
    }

    /// Derives the banned host from a raw pattern, before it is stored.
    pub fn host_of(pattern: &str) -> Option<String> {
        banned_host(pattern)
    }

    /// Returns true if `host` is the banned host or one of its subdomains.
    pub fn matches_host(&self, host: &str) -> bool {
        let Some(banned) = self.host() else {
            return false;
        };
        let host = host.trim_end_matches('.').to_ascii_lowercase();

        host == banned || host.ends_with(&format!(".{banned}"))
    }
}

/// Input data for creating a banned domain entry.
#[derive(Debug, Clone)]
pub struct NewBannedDomain {
    pub id: Uuid,
    pub url: String,
}

impl NewBannedDomain {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
        }
    }
}

fn banned_host(pattern: &str) -> Option<String> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return None;
    }

    let host = match url::Url::parse(pattern) {
        Ok(parsed) => parsed.host_str()?.to_string(),
        Err(_) => pattern
            .split(['/', ':', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    (!host.is_empty()).then_some(host)
}
