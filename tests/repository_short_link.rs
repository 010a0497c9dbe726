mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use shortlink_admin::domain::entities::{NewShortLink, ShortLinkPatch};
use shortlink_admin::domain::listing::{ListQuery, ShortLinkSort, SortDirection};
use shortlink_admin::domain::repositories::ShortLinkRepository;
use shortlink_admin::infrastructure::persistence::PgShortLinkRepository;

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let user_id = common::insert_user(&pool, "alice").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    let id = Uuid::new_v4();

    let created = repo
        .create(NewShortLink {
            id,
            short_code: "docs".to_string(),
            target_url: "https://docs.example.com".to_string(),
            user_id,
            expires_at: Utc::now() + Duration::days(1),
        })
        .await
        .unwrap();

    assert_eq!(created.id, id);
    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.short_code, "docs");
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_create_with_unknown_owner_fails(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let result = repo
        .create(NewShortLink {
            id: Uuid::new_v4(),
            short_code: "orphan".to_string(),
            target_url: "https://example.com".to_string(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() + Duration::days(1),
        })
        .await;

    assert!(result.is_err());
}

#[sqlx::test]
async fn test_find_expired_is_strict(pool: PgPool) {
    let user_id = common::insert_user(&pool, "alice").await;
    let now = Utc::now();
    let past =
        common::insert_short_link(&pool, user_id, "past", "https://a.example", now - Duration::hours(1))
            .await;
    common::insert_short_link(&pool, user_id, "edge", "https://b.example", now).await;
    common::insert_short_link(
        &pool,
        user_id,
        "future",
        "https://c.example",
        now + Duration::hours(1),
    )
    .await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let expired = repo.find_expired(now).await.unwrap();

    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, past);
}

#[sqlx::test]
async fn test_update_and_delete(pool: PgPool) {
    let user_id = common::insert_user(&pool, "alice").await;
    let id = common::insert_short_link(
        &pool,
        user_id,
        "old",
        "https://old.example",
        Utc::now() + Duration::days(1),
    )
    .await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let updated = repo
        .update(
            id,
            ShortLinkPatch {
                short_code: "new".to_string(),
                target_url: "https://new.example".to_string(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.short_code, "new");
    assert!(updated.updated_at >= updated.created_at);

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
}

#[sqlx::test]
async fn test_list_and_count_share_filter(pool: PgPool) {
    let user_id = common::insert_user(&pool, "alice").await;
    let later = Utc::now() + Duration::days(1);
    for code in ["promo-a", "promo-b", "promo-c", "other"] {
        common::insert_short_link(&pool, user_id, code, "https://example.com", later).await;
    }
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let query = ListQuery::<ShortLinkSort>::page(1, 2)
        .with_search("promo")
        .with_sort(ShortLinkSort::ShortCode, SortDirection::Desc);

    let items = repo.list(&query).await.unwrap();
    let total = repo.count_matching(&query).await.unwrap();

    let codes: Vec<_> = items.iter().map(|l| l.short_code.as_str()).collect();
    assert_eq!(codes, vec!["promo-c", "promo-b"]);
    assert_eq!(total, 3);
    assert_eq!(repo.count().await.unwrap(), 4);
}

#[sqlx::test]
async fn test_search_is_case_sensitive(pool: PgPool) {
    let user_id = common::insert_user(&pool, "alice").await;
    let later = Utc::now() + Duration::days(1);
    common::insert_short_link(&pool, user_id, "Promo", "https://example.com", later).await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let lower = ListQuery::<ShortLinkSort>::page(1, 10).with_search("promo");
    let exact = ListQuery::<ShortLinkSort>::page(1, 10).with_search("Promo");

    assert_eq!(repo.count_matching(&lower).await.unwrap(), 0);
    assert_eq!(repo.count_matching(&exact).await.unwrap(), 1);
}
