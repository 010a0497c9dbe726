//! Visit fixtures and generated visits.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use super::short_link_seeder::{BLOG_LINK_ID, DOCS_LINK_ID};
use super::{SeedMode, Seeder, factory};
use crate::domain::entities::NewVisit;
use crate::domain::repositories::{ShortLinkRepository, VisitRepository};
use crate::error::AppError;

fn fixtures() -> Vec<NewVisit> {
    vec![
        NewVisit {
            id: Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0002_0001),
            short_link_id: DOCS_LINK_ID,
            ip_address: "203.0.113.10".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0"
                .to_string(),
        },
        NewVisit {
            id: Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0002_0002),
            short_link_id: DOCS_LINK_ID,
            ip_address: "198.51.100.7".to_string(),
            user_agent: "curl/8.7.1".to_string(),
        },
        NewVisit {
            id: Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0002_0003),
            short_link_id: BLOG_LINK_ID,
            ip_address: "192.0.2.44".to_string(),
            user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X)".to_string(),
        },
    ]
}

pub struct VisitSeeder<V: VisitRepository, S: ShortLinkRepository> {
    visits: Arc<V>,
    short_links: Arc<S>,
    mode: SeedMode,
    count: usize,
}

impl<V: VisitRepository, S: ShortLinkRepository> VisitSeeder<V, S> {
    pub fn new(visits: Arc<V>, short_links: Arc<S>, mode: SeedMode, count: usize) -> Self {
        Self {
            visits,
            short_links,
            mode,
            count,
        }
    }

    async fn records(&self) -> Result<Vec<NewVisit>, AppError> {
        match self.mode {
            SeedMode::Manual => Ok(fixtures()),
            SeedMode::Factory => {
                let link_ids = self.short_links.list_ids().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to load short links for visit seeding");
                    e
                })?;
                generate(&link_ids, self.count)
            }
        }
    }
}

fn generate(short_link_ids: &[Uuid], count: usize) -> Result<Vec<NewVisit>, AppError> {
    if short_link_ids.is_empty() {
        return Err(AppError::bad_request(
            "Cannot generate visits without existing short links",
            json!({ "requested": count }),
        ));
    }

    let mut rng = rand::rng();
    (0..count)
        .map(|_| factory::fake_visit(short_link_ids, &mut rng))
        .collect()
}

#[async_trait]
impl<V, S> Seeder for VisitSeeder<V, S>
where
    V: VisitRepository + 'static,
    S: ShortLinkRepository + 'static,
{
    fn name(&self) -> &'static str {
        "visits"
    }

    async fn seed(&self) -> Result<usize, AppError> {
        let records = self.records().await?;
        let total = records.len();

        for record in records {
            let short_link_id = record.short_link_id;
            self.visits.create(record).await.map_err(|e| {
                tracing::error!(%short_link_id, error = %e, "Failed to seed visit");
                e
            })?;
        }

        Ok(total)
    }
}
