//! Visit counters.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use crate::application::deadline::{DEFAULT_OPERATION_TIMEOUT, with_deadline};
use crate::application::report;
use crate::domain::repositories::{ShortLinkRepository, VisitRepository};
use crate::error::AppError;

/// Read-only access to recorded visits.
pub struct VisitService<V: VisitRepository, S: ShortLinkRepository> {
    visits: Arc<V>,
    short_links: Arc<S>,
    timeout: Duration,
}

impl<V: VisitRepository, S: ShortLinkRepository> VisitService<V, S> {
    pub fn new(visits: Arc<V>, short_links: Arc<S>) -> Self {
        Self {
            visits,
            short_links,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of visits across all links.
    pub async fn count_visits(&self) -> Result<i64, AppError> {
        with_deadline(self.timeout, "count_visits", self.visits.count())
            .await
            .map_err(report("visit", "count", "Failed to count visits"))
    }

    /// Number of visits recorded for one link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist, so an
    /// unknown id is not mistaken for a link nobody visited.
    pub async fn count_visits_for(&self, short_link_id: Uuid) -> Result<i64, AppError> {
        with_deadline(self.timeout, "count_visits_for", async {
            if self.short_links.find_by_id(short_link_id).await?.is_none() {
                return Err(AppError::not_found(
                    "Short link not found",
                    json!({ "id": short_link_id }),
                ));
            }
            self.visits.count_for_short_link(short_link_id).await
        })
        .await
        .map_err(report("visit", "count_for_link", "Failed to count visits"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortLink;
    use crate::domain::repositories::{MockShortLinkRepository, MockVisitRepository};
    use chrono::Utc;

    #[tokio::test]
    async fn test_count_all() {
        let mut visits = MockVisitRepository::new();
        visits.expect_count().times(1).returning(|| Ok(120));

        let service = VisitService::new(Arc::new(visits), Arc::new(MockShortLinkRepository::new()));

        assert_eq!(service.count_visits().await.unwrap(), 120);
    }

    #[tokio::test]
    async fn test_count_for_existing_link() {
        let link_id = Uuid::new_v4();

        let mut links = MockShortLinkRepository::new();
        links.expect_find_by_id().times(1).returning(|id| {
            Ok(Some(ShortLink {
                id,
                short_code: "promo".to_string(),
                target_url: "https://example.com".to_string(),
                user_id: Uuid::new_v4(),
                expires_at: Utc::now(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });

        let mut visits = MockVisitRepository::new();
        visits
            .expect_count_for_short_link()
            .withf(move |id| *id == link_id)
            .times(1)
            .returning(|_| Ok(7));

        let service = VisitService::new(Arc::new(visits), Arc::new(links));

        assert_eq!(service.count_visits_for(link_id).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_count_for_unknown_link() {
        let mut links = MockShortLinkRepository::new();
        links.expect_find_by_id().returning(|_| Ok(None));

        let mut visits = MockVisitRepository::new();
        visits.expect_count_for_short_link().times(0);

        let service = VisitService::new(Arc::new(visits), Arc::new(links));
        let err = service.count_visits_for(Uuid::new_v4()).await.unwrap_err();

        assert!(err.is_not_found());
    }
}
