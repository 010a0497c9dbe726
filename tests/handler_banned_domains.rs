mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test]
async fn test_banned_domain_lifecycle(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .post("/api/admin/banned-domains")
        .json(&json!({ "url": "https://spam.example" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .put(&format!("/api/admin/banned-domains/{id}"))
        .json(&json!({ "url": "https://scam.example" }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["url"],
        "https://scam.example"
    );

    let response = server
        .get("/api/admin/banned-domains")
        .add_query_param("search", "scam")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["total_count"], 1);

    server
        .delete(&format!("/api/admin/banned-domains/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[sqlx::test]
async fn test_update_unknown_banned_domain(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .put(&format!("/api/admin/banned-domains/{}", Uuid::new_v4()))
        .json(&json!({ "url": "https://spam.example" }))
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_list_sorted_by_url_desc(pool: PgPool) {
    for url in ["a.example", "c.example", "b.example"] {
        common::insert_banned_domain(&pool, url).await;
    }
    let server = common::make_server(pool);

    let response = server
        .get("/api/admin/banned-domains")
        .add_query_param("sort_by", "url")
        .add_query_param("sort_order", "desc")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let urls: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["url"].as_str().unwrap())
        .collect();
    assert_eq!(urls, vec!["c.example", "b.example", "a.example"]);
}
