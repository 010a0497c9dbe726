//! Deletes short links whose expiry instant has passed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::Job;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// Outcome of one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Expired links found at discovery time.
    pub discovered: usize,
    pub deleted: usize,
    /// Links that had vanished before their delete ran.
    pub already_gone: usize,
    /// Deletes that failed; those links stay until the next sweep.
    pub failed: usize,
}

impl SweepReport {
    /// Number of delete attempts made.
    pub fn attempted(&self) -> usize {
        self.deleted + self.already_gone + self.failed
    }
}

/// Discovers expired short links and deletes them one at a time.
///
/// A failed delete is logged and skipped; the sweep never aborts part way
/// and never retries within the same pass.
pub struct ExpirySweeper<S: ShortLinkRepository> {
    repository: Arc<S>,
}

impl<S: ShortLinkRepository> ExpirySweeper<S> {
    pub fn new(repository: Arc<S>) -> Self {
        Self { repository }
    }

    /// Sweeps links that expired strictly before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error only if discovery fails. Individual delete failures
    /// are counted in the report.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<SweepReport, AppError> {
        let expired = self.repository.find_expired(now).await.map_err(|e| {
            tracing::error!(
                entity = "short_link",
                operation = "find_expired",
                error = %e,
                "Failed to discover expired short links"
            );
            e
        })?;

        let mut report = SweepReport {
            discovered: expired.len(),
            ..SweepReport::default()
        };

        if expired.is_empty() {
            info!(%now, "No expired short links");
            return Ok(report);
        }

        info!(count = expired.len(), %now, "Sweeping expired short links");

        for link in expired {
            match self.repository.delete(link.id).await {
                Ok(true) => {
                    report.deleted += 1;
                    debug!(
                        id = %link.id,
                        short_code = %link.short_code,
                        expires_at = %link.expires_at,
                        "Expired short link deleted"
                    );
                }
                Ok(false) => {
                    report.already_gone += 1;
                    debug!(id = %link.id, "Expired short link already gone");
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        id = %link.id,
                        short_code = %link.short_code,
                        error = %e,
                        "Failed to delete expired short link"
                    );
                }
            }
        }

        metrics::counter!("expiry_sweeper_deleted_total").increment(report.deleted as u64);
        metrics::counter!("expiry_sweeper_already_gone_total")
            .increment(report.already_gone as u64);
        metrics::counter!("expiry_sweeper_failed_total").increment(report.failed as u64);

        info!(
            discovered = report.discovered,
            deleted = report.deleted,
            already_gone = report.already_gone,
            failed = report.failed,
            "Expiry sweep completed"
        );

        Ok(report)
    }
}

#[async_trait]
impl<S: ShortLinkRepository + 'static> Job for ExpirySweeper<S> {
    fn name(&self) -> &'static str {
        "expiry_sweeper"
    }

    async fn run_once(&self) -> Result<(), AppError> {
        self.sweep_at(Utc::now()).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortLink;
    use crate::domain::repositories::MockShortLinkRepository;
    use chrono::Duration;
    use mockall::Sequence;
    use serde_json::json;
    use uuid::Uuid;

    fn expired_link(n: u128, now: DateTime<Utc>) -> ShortLink {
        ShortLink {
            id: Uuid::from_u128(n),
            short_code: format!("old{n}"),
            target_url: "https://example.com".to_string(),
            user_id: Uuid::from_u128(1000),
            expires_at: now - Duration::hours(1),
            created_at: now - Duration::days(3),
            updated_at: now - Duration::days(3),
        }
    }

    #[tokio::test]
    async fn test_each_expired_link_deleted_exactly_once() {
        let now = Utc::now();
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_expired()
            .withf(move |t| *t == now)
            .times(1)
            .returning(move |_| Ok((1..=3).map(|n| expired_link(n, now)).collect()));
        for n in 1..=3u128 {
            mock.expect_delete()
                .withf(move |id| *id == Uuid::from_u128(n))
                .times(1)
                .returning(|_| Ok(true));
        }

        let sweeper = ExpirySweeper::new(Arc::new(mock));
        let report = sweeper.sweep_at(now).await.unwrap();

        assert_eq!(report.discovered, 3);
        assert_eq!(report.deleted, 3);
        assert_eq!(report.attempted(), 3);
    }

    #[tokio::test]
    async fn test_nothing_expired_makes_no_delete_calls() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_expired().times(1).returning(|_| Ok(vec![]));
        mock.expect_delete().times(0);

        let sweeper = ExpirySweeper::new(Arc::new(mock));
        let report = sweeper.sweep_at(Utc::now()).await.unwrap();

        assert_eq!(report, SweepReport::default());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_batch() {
        let now = Utc::now();
        let mut seq = Sequence::new();
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_expired()
            .returning(move |_| Ok((1..=3).map(|n| expired_link(n, now)).collect()));
        mock.expect_delete()
            .withf(|id| *id == Uuid::from_u128(1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock.expect_delete()
            .withf(|id| *id == Uuid::from_u128(2))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        mock.expect_delete()
            .withf(|id| *id == Uuid::from_u128(3))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        let sweeper = ExpirySweeper::new(Arc::new(mock));
        let report = sweeper.sweep_at(now).await.unwrap();

        assert_eq!(report.deleted, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.attempted(), 3);
    }

    #[tokio::test]
    async fn test_already_deleted_link_is_benign() {
        let now = Utc::now();
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_expired()
            .returning(move |_| Ok(vec![expired_link(1, now)]));
        mock.expect_delete().times(1).returning(|_| Ok(false));

        let sweeper = ExpirySweeper::new(Arc::new(mock));
        let report = sweeper.sweep_at(now).await.unwrap();

        assert_eq!(report.already_gone, 1);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn test_discovery_failure_is_an_error() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_expired()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        mock.expect_delete().times(0);

        let sweeper = ExpirySweeper::new(Arc::new(mock));

        assert!(sweeper.run_once().await.is_err());
    }
}
