//! Banned domain management service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use crate::application::deadline::{DEFAULT_OPERATION_TIMEOUT, with_deadline};
use crate::application::listing::fetch_page;
use crate::application::report;
use crate::domain::entities::{BannedDomain, NewBannedDomain};
use crate::domain::listing::{BannedDomainSort, ListQuery, Page};
use crate::domain::repositories::BannedDomainRepository;
use crate::error::AppError;

/// Service for the list of domains new short links may not point at.
pub struct BannedDomainService<R: BannedDomainRepository> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R: BannedDomainRepository> BannedDomainService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn list_banned_domains(
        &self,
        query: ListQuery<BannedDomainSort>,
    ) -> Result<Page<BannedDomain>, AppError> {
        let page = fetch_page(
            &query,
            self.repository.list(&query),
            self.repository.count_matching(&query),
        );

        with_deadline(self.timeout, "list_banned_domains", page)
            .await
            .map_err(report(
                "banned_domain",
                "list",
                "Failed to retrieve banned domains",
            ))
    }

    /// Adds a banned domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no host can be derived from `url`.
    pub async fn create_banned_domain(&self, url: String) -> Result<BannedDomain, AppError> {
        let entry = NewBannedDomain::new(url);
        ensure_has_host(&entry.url)?;

        let created = with_deadline(
            self.timeout,
            "create_banned_domain",
            self.repository.create(entry),
        )
        .await
        .map_err(report(
            "banned_domain",
            "create",
            "Failed to create banned domain",
        ))?;

        tracing::info!(id = %created.id, url = %created.url, "Banned domain added");
        Ok(created)
    }

    /// Replaces the URL pattern of an entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    pub async fn update_banned_domain(
        &self,
        id: Uuid,
        url: String,
    ) -> Result<BannedDomain, AppError> {
        ensure_has_host(&url)?;

        with_deadline(self.timeout, "update_banned_domain", async {
            self.repository
                .update(id, url)
                .await?
                .ok_or_else(|| banned_domain_not_found(id))
        })
        .await
        .map_err(report(
            "banned_domain",
            "update",
            "Failed to update banned domain",
        ))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    pub async fn delete_banned_domain(&self, id: Uuid) -> Result<(), AppError> {
        with_deadline(self.timeout, "delete_banned_domain", async {
            if self.repository.delete(id).await? {
                Ok(())
            } else {
                Err(banned_domain_not_found(id))
            }
        })
        .await
        .map_err(report(
            "banned_domain",
            "delete",
            "Failed to delete banned domain",
        ))?;

        tracing::info!(%id, "Banned domain removed");
        Ok(())
    }
}

fn ensure_has_host(url: &str) -> Result<(), AppError> {
    if BannedDomain::host_of(url).is_none() {
        return Err(AppError::bad_request(
            "Banned domain must name a host",
            json!({ "url": url }),
        ));
    }
    Ok(())
}

fn banned_domain_not_found(id: Uuid) -> AppError {
    AppError::not_found("Banned domain not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockBannedDomainRepository;
    use chrono::Utc;

    fn entry(url: &str) -> BannedDomain {
        BannedDomain {
            id: Uuid::new_v4(),
            url: url.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_banned_domain() {
        let mut mock = MockBannedDomainRepository::new();
        mock.expect_create()
            .withf(|n| n.url == "https://spam.example")
            .times(1)
            .returning(|n| Ok(entry(&n.url)));

        let service = BannedDomainService::new(Arc::new(mock));
        let created = service
            .create_banned_domain("https://spam.example".to_string())
            .await
            .unwrap();

        assert_eq!(created.url, "https://spam.example");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_pattern() {
        let mut mock = MockBannedDomainRepository::new();
        mock.expect_create().times(0);

        let service = BannedDomainService::new(Arc::new(mock));
        let err = service
            .create_banned_domain("   ".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_entry() {
        let mut mock = MockBannedDomainRepository::new();
        mock.expect_update().times(1).returning(|_, _| Ok(None));

        let service = BannedDomainService::new(Arc::new(mock));
        let err = service
            .update_banned_domain(Uuid::new_v4(), "spam.example".to_string())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let mut mock = MockBannedDomainRepository::new();
        mock.expect_delete().times(1).returning(|_| Ok(true));

        let service = BannedDomainService::new(Arc::new(mock));

        assert!(service.delete_banned_domain(Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_store_failure_is_relabelled() {
        let mut mock = MockBannedDomainRepository::new();
        mock.expect_list()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        mock.expect_count_matching().returning(|_| Ok(0));

        let service = BannedDomainService::new(Arc::new(mock));
        let err = service
            .list_banned_domains(ListQuery::default())
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::Internal { ref message, .. } if message == "Failed to retrieve banned domains")
        );
    }
}
