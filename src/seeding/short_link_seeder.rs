//! Short link fixtures and generated short links.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use super::user_seeder::{ALICE_ID, BOB_ID};
use super::{SeedMode, Seeder, factory};
use crate::domain::entities::NewShortLink;
use crate::domain::repositories::{ShortLinkRepository, UserRepository};
use crate::error::AppError;

pub const DOCS_LINK_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0001_0001);
pub const BLOG_LINK_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0001_0002);
pub const EXPIRED_LINK_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0001_0003);

/// Includes one already-expired link so the sweeper has something to do.
fn fixtures(now: DateTime<Utc>) -> Vec<NewShortLink> {
    vec![
        NewShortLink {
            id: DOCS_LINK_ID,
            short_code: "docs".to_string(),
            target_url: "https://docs.example.com/getting-started".to_string(),
            user_id: ALICE_ID,
            expires_at: now + Duration::days(30),
        },
        NewShortLink {
            id: BLOG_LINK_ID,
            short_code: "blog".to_string(),
            target_url: "https://blog.example.org/".to_string(),
            user_id: BOB_ID,
            expires_at: now + Duration::days(7),
        },
        NewShortLink {
            id: EXPIRED_LINK_ID,
            short_code: "launch".to_string(),
            target_url: "https://example.net/launch".to_string(),
            user_id: ALICE_ID,
            expires_at: now - Duration::days(1),
        },
    ]
}

pub struct ShortLinkSeeder<S: ShortLinkRepository, U: UserRepository> {
    short_links: Arc<S>,
    users: Arc<U>,
    mode: SeedMode,
    count: usize,
}

impl<S: ShortLinkRepository, U: UserRepository> ShortLinkSeeder<S, U> {
    pub fn new(short_links: Arc<S>, users: Arc<U>, mode: SeedMode, count: usize) -> Self {
        Self {
            short_links,
            users,
            mode,
            count,
        }
    }

    async fn records(&self, now: DateTime<Utc>) -> Result<Vec<NewShortLink>, AppError> {
        match self.mode {
            SeedMode::Manual => Ok(fixtures(now)),
            SeedMode::Factory => {
                let user_ids = self.users.list_ids().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to load users for short link seeding");
                    e
                })?;
                generate(&user_ids, self.count, now)
            }
        }
    }
}

fn generate(
    user_ids: &[Uuid],
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<NewShortLink>, AppError> {
    if user_ids.is_empty() {
        return Err(AppError::bad_request(
            "Cannot generate short links without existing users",
            json!({ "requested": count }),
        ));
    }

    let mut rng = rand::rng();
    (0..count)
        .map(|_| factory::fake_short_link(user_ids, &mut rng, now))
        .collect()
}

#[async_trait]
impl<S, U> Seeder for ShortLinkSeeder<S, U>
where
    S: ShortLinkRepository + 'static,
    U: UserRepository + 'static,
{
    fn name(&self) -> &'static str {
        "short_links"
    }

    async fn seed(&self) -> Result<usize, AppError> {
        let records = self.records(Utc::now()).await?;
        let total = records.len();

        for record in records {
            let short_code = record.short_code.clone();
            self.short_links.create(record).await.map_err(|e| {
                tracing::error!(%short_code, error = %e, "Failed to seed short link");
                e
            })?;
        }

        Ok(total)
    }
}
