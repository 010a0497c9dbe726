mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test]
async fn test_visit_counts(pool: PgPool) {
    let user_id = common::insert_user(&pool, "alice").await;
    let later = Utc::now() + Duration::days(1);
    let busy = common::insert_short_link(&pool, user_id, "busy", "https://example.com/1", later)
        .await;
    let quiet =
        common::insert_short_link(&pool, user_id, "quiet", "https://example.com/2", later).await;
    for _ in 0..3 {
        common::insert_visit(&pool, busy).await;
    }
    common::insert_visit(&pool, quiet).await;
    let server = common::make_server(pool);

    let total = server.get("/api/admin/visits/count").await;
    total.assert_status_ok();
    assert_eq!(total.json::<serde_json::Value>()["count"], 4);

    let for_busy = server
        .get(&format!("/api/admin/visits/{busy}/count"))
        .await;
    for_busy.assert_status_ok();
    assert_eq!(for_busy.json::<serde_json::Value>()["count"], 3);
}

#[sqlx::test]
async fn test_visit_count_for_unknown_link(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .get(&format!("/api/admin/visits/{}/count", Uuid::new_v4()))
        .await;

    response.assert_status_not_found();
}
