//! Short link management service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::application::deadline::{DEFAULT_OPERATION_TIMEOUT, with_deadline};
use crate::application::listing::fetch_page;
use crate::application::report;
use crate::domain::entities::{NewShortLink, ShortLink, ShortLinkPatch};
use crate::domain::listing::{ListQuery, Page, ShortLinkSort};
use crate::domain::repositories::{BannedDomainRepository, ShortLinkRepository, UserRepository};
use crate::error::AppError;

/// Service for administering short links.
///
/// New and edited targets are screened against the banned domain list.
/// The expiry instant is set once at creation and never changed afterwards.
pub struct ShortLinkService<S, U, B>
where
    S: ShortLinkRepository,
    U: UserRepository,
    B: BannedDomainRepository,
{
    short_links: Arc<S>,
    users: Arc<U>,
    banned_domains: Arc<B>,
    timeout: Duration,
}

impl<S, U, B> ShortLinkService<S, U, B>
where
    S: ShortLinkRepository,
    U: UserRepository,
    B: BannedDomainRepository,
{
    /// Creates a new short link service.
    pub fn new(short_links: Arc<S>, users: Arc<U>, banned_domains: Arc<B>) -> Self {
        Self {
            short_links,
            users,
            banned_domains,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Overrides the per-operation time budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns one page of short links plus pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if either the page or the count query fails.
    /// Returns [`AppError::Timeout`] if the budget is exceeded.
    pub async fn list_short_links(
        &self,
        query: ListQuery<ShortLinkSort>,
    ) -> Result<Page<ShortLink>, AppError> {
        let page = fetch_page(
            &query,
            self.short_links.list(&query),
            self.short_links.count_matching(&query),
        );

        with_deadline(self.timeout, "list_short_links", page)
            .await
            .map_err(report("short_link", "list", "Failed to retrieve short links"))
    }

    /// Retrieves a short link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_short_link(&self, id: Uuid) -> Result<ShortLink, AppError> {
        with_deadline(self.timeout, "get_short_link", async {
            self.short_links
                .find_by_id(id)
                .await?
                .ok_or_else(|| short_link_not_found(id))
        })
        .await
        .map_err(report("short_link", "get", "Failed to retrieve short link"))
    }

    /// Creates a short link owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the expiry is not in the future or
    /// the target's domain is banned.
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    pub async fn create_short_link(
        &self,
        short_code: String,
        target_url: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<ShortLink, AppError> {
        if expires_at <= Utc::now() {
            return Err(AppError::bad_request(
                "Expiry must be in the future",
                json!({ "expires_at": expires_at }),
            ));
        }

        let link = with_deadline(self.timeout, "create_short_link", async {
            if self.users.find_by_id(user_id).await?.is_none() {
                return Err(AppError::not_found(
                    "User not found",
                    json!({ "user_id": user_id }),
                ));
            }

            self.ensure_target_allowed(&target_url).await?;

            self.short_links
                .create(NewShortLink {
                    id: Uuid::new_v4(),
                    short_code,
                    target_url,
                    user_id,
                    expires_at,
                })
                .await
        })
        .await
        .map_err(report("short_link", "create", "Failed to create short link"))?;

        tracing::info!(id = %link.id, short_code = %link.short_code, "Short link created");
        Ok(link)
    }

    /// Changes the short code and target URL of a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Validation`] if the new target's domain is banned.
    pub async fn update_short_link(
        &self,
        id: Uuid,
        short_code: String,
        target_url: String,
    ) -> Result<ShortLink, AppError> {
        let link = with_deadline(self.timeout, "update_short_link", async {
            self.ensure_target_allowed(&target_url).await?;

            self.short_links
                .update(
                    id,
                    ShortLinkPatch {
                        short_code,
                        target_url,
                    },
                )
                .await?
                .ok_or_else(|| short_link_not_found(id))
        })
        .await
        .map_err(report("short_link", "update", "Failed to update short link"))?;

        tracing::info!(id = %link.id, "Short link updated");
        Ok(link)
    }

    /// Deletes a short link together with its visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete_short_link(&self, id: Uuid) -> Result<(), AppError> {
        with_deadline(self.timeout, "delete_short_link", async {
            if self.short_links.delete(id).await? {
                Ok(())
            } else {
                Err(short_link_not_found(id))
            }
        })
        .await
        .map_err(report("short_link", "delete", "Failed to delete short link"))?;

        tracing::info!(%id, "Short link deleted");
        Ok(())
    }

    /// Counts all stored short links.
    pub async fn count_short_links(&self) -> Result<i64, AppError> {
        with_deadline(self.timeout, "count_short_links", self.short_links.count())
            .await
            .map_err(report("short_link", "count", "Failed to count short links"))
    }

    /// Rejects targets that are not absolute URLs or whose host is banned.
    async fn ensure_target_allowed(&self, target_url: &str) -> Result<(), AppError> {
        let parsed = url::Url::parse(target_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;
        let Some(host) = parsed.host_str() else {
            return Err(AppError::bad_request(
                "Target URL has no host",
                json!({ "target_url": target_url }),
            ));
        };

        let banned = self.banned_domains.list_all().await?;
        if let Some(entry) = banned.iter().find(|entry| entry.matches_host(host)) {
            return Err(AppError::bad_request(
                "Target URL domain is banned",
                json!({ "host": host, "banned_domain_id": entry.id }),
            ));
        }

        Ok(())
    }
}

fn short_link_not_found(id: Uuid) -> AppError {
    AppError::not_found("Short link not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BannedDomain, User};
    use crate::domain::repositories::{
        MockBannedDomainRepository, MockShortLinkRepository, MockUserRepository,
    };
    use chrono::Duration as ChronoDuration;

    type Service =
        ShortLinkService<MockShortLinkRepository, MockUserRepository, MockBannedDomainRepository>;

    fn service(
        links: MockShortLinkRepository,
        users: MockUserRepository,
        banned: MockBannedDomainRepository,
    ) -> Service {
        ShortLinkService::new(Arc::new(links), Arc::new(users), Arc::new(banned))
    }

    fn test_link(code: &str) -> ShortLink {
        ShortLink {
            id: Uuid::new_v4(),
            short_code: code.to_string(),
            target_url: "https://example.com".to_string(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() + ChronoDuration::days(2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_user(id: Uuid) -> User {
        User {
            id,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            is_banned: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn banned_entry(url: &str) -> BannedDomain {
        BannedDomain {
            id: Uuid::new_v4(),
            url: url.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_builds_page_from_items_and_count() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_list()
            .withf(|q| q.page == 2 && q.page_size == 10 && q.offset() == 10)
            .times(1)
            .returning(|_| Ok((0..10).map(|i| test_link(&format!("code{i}"))).collect()));
        links
            .expect_count_matching()
            .times(1)
            .returning(|_| Ok(25));

        let svc = service(
            links,
            MockUserRepository::new(),
            MockBannedDomainRepository::new(),
        );

        let page = svc
            .list_short_links(ListQuery::page(2, 10))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_passes_search_to_both_queries() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_list()
            .withf(|q| q.search.as_deref() == Some("promo"))
            .times(1)
            .returning(|_| Ok(vec![test_link("promo-1")]));
        links
            .expect_count_matching()
            .withf(|q| q.search.as_deref() == Some("promo"))
            .times(1)
            .returning(|_| Ok(1));

        let svc = service(
            links,
            MockUserRepository::new(),
            MockBannedDomainRepository::new(),
        );

        let page = svc
            .list_short_links(ListQuery::default().with_search("promo"))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_count_failure_is_retrieval_error() {
        let mut links = MockShortLinkRepository::new();
        links.expect_list().returning(|_| Ok(vec![test_link("a")]));
        links
            .expect_count_matching()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let svc = service(
            links,
            MockUserRepository::new(),
            MockBannedDomainRepository::new(),
        );

        let err = svc.list_short_links(ListQuery::default()).await.unwrap_err();

        assert!(
            matches!(err, AppError::Internal { ref message, .. } if message == "Failed to retrieve short links")
        );
    }

    #[tokio::test]
    async fn test_get_missing_link_is_not_found() {
        let mut links = MockShortLinkRepository::new();
        links.expect_find_by_id().times(1).returning(|_| Ok(None));

        let svc = service(
            links,
            MockUserRepository::new(),
            MockBannedDomainRepository::new(),
        );

        let err = svc.get_short_link(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_success() {
        let owner = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(move |id| *id == owner)
            .times(1)
            .returning(move |id| Ok(Some(test_user(id))));

        let mut banned = MockBannedDomainRepository::new();
        banned
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![banned_entry("https://spam.example")]));

        let mut links = MockShortLinkRepository::new();
        links
            .expect_create()
            .withf(move |n| n.short_code == "promo" && n.user_id == owner)
            .times(1)
            .returning(|n| {
                Ok(ShortLink {
                    id: n.id,
                    short_code: n.short_code,
                    target_url: n.target_url,
                    user_id: n.user_id,
                    expires_at: n.expires_at,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let svc = service(links, users, banned);

        let link = svc
            .create_short_link(
                "promo".to_string(),
                "https://example.com/landing".to_string(),
                owner,
                Utc::now() + ChronoDuration::days(2),
            )
            .await
            .unwrap();

        assert_eq!(link.short_code, "promo");
        assert_eq!(link.user_id, owner);
    }

    #[tokio::test]
    async fn test_create_unknown_owner_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut links = MockShortLinkRepository::new();
        links.expect_create().times(0);

        let svc = service(links, users, MockBannedDomainRepository::new());

        let err = svc
            .create_short_link(
                "promo".to_string(),
                "https://example.com".to_string(),
                Uuid::new_v4(),
                Utc::now() + ChronoDuration::days(1),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_rejects_banned_domain() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_user(id))));

        let mut banned = MockBannedDomainRepository::new();
        banned
            .expect_list_all()
            .returning(|| Ok(vec![banned_entry("spam.example")]));

        let mut links = MockShortLinkRepository::new();
        links.expect_create().times(0);

        let svc = service(links, users, banned);

        let err = svc
            .create_short_link(
                "promo".to_string(),
                "https://www.spam.example/win".to_string(),
                Uuid::new_v4(),
                Utc::now() + ChronoDuration::days(1),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_past_expiry_before_any_lookup() {
        let svc = service(
            MockShortLinkRepository::new(),
            MockUserRepository::new(),
            MockBannedDomainRepository::new(),
        );

        let err = svc
            .create_short_link(
                "promo".to_string(),
                "https://example.com".to_string(),
                Uuid::new_v4(),
                Utc::now() - ChronoDuration::minutes(1),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_link_is_not_found() {
        let mut banned = MockBannedDomainRepository::new();
        banned.expect_list_all().returning(|| Ok(vec![]));

        let mut links = MockShortLinkRepository::new();
        links.expect_update().times(1).returning(|_, _| Ok(None));

        let svc = service(links, MockUserRepository::new(), banned);

        let err = svc
            .update_short_link(
                Uuid::new_v4(),
                "new-code".to_string(),
                "https://example.org".to_string(),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_link_is_not_found() {
        let mut links = MockShortLinkRepository::new();
        links.expect_delete().times(1).returning(|_| Ok(false));

        let svc = service(
            links,
            MockUserRepository::new(),
            MockBannedDomainRepository::new(),
        );

        let err = svc.delete_short_link(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_count() {
        let mut links = MockShortLinkRepository::new();
        links.expect_count().times(1).returning(|| Ok(42));

        let svc = service(
            links,
            MockUserRepository::new(),
            MockBannedDomainRepository::new(),
        );

        assert_eq!(svc.count_short_links().await.unwrap(), 42);
    }
}
