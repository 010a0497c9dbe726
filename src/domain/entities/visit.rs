//! Visit entity recording one access to a short link.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single recorded access to a short link. Never mutated.
#[derive(Debug, Clone)]
pub struct Visit {
    pub id: Uuid,
    pub short_link_id: Uuid,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for recording a visit.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub id: Uuid,
    pub short_link_id: Uuid,
    pub ip_address: String,
    pub user_agent: String,
}
