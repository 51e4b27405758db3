mod common;

use axum::{Extension, Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;

use atomzr::api::handlers::bulk_handler;
use atomzr::state::AppState;

fn bulk_app(state: AppState) -> Router {
    Router::new()
        .route("/api/bulk", post(bulk_handler))
        .layer(Extension(common::anonymous()))
        .with_state(state)
}

#[sqlx::test]
async fn test_bulk_creates_links_from_captions(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(bulk_app(state)).unwrap();

    let response = server
        .post("/api/bulk")
        .json(&json!({
            "lines": "My Post;https://example.com/a\nSecond Post;https://example.com/b"
        }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["summary"]["total"], 2);
    assert_eq!(body["summary"]["successful"], 2);
    assert_eq!(body["summary"]["failed"], 0);

    let outcomes = body["outcomes"].as_array().unwrap();
    assert_eq!(outcomes[0]["alias"], "my-post");
    assert_eq!(
        outcomes[0]["short_url"],
        format!("{}/my-post", common::TEST_BASE_URL)
    );

    assert!(common::link_exists(&pool, "my-post").await);
    assert!(common::link_exists(&pool, "second-post").await);
}

#[sqlx::test]
async fn test_bulk_mixed_outcomes(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    common::insert_link(&pool, "already-there", "https://example.com/old").await;

    let server = TestServer::new(bulk_app(state)).unwrap();

    let response = server
        .post("/api/bulk")
        .json(&json!({
            "lines": "Good One;https://example.com/a\nBad Format\nCaption;not-a-url\nAlready There;https://example.com/dup"
        }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["summary"]["total"], 4);
    assert_eq!(body["summary"]["successful"], 1);
    assert_eq!(body["summary"]["failed"], 3);

    let outcomes = body["outcomes"].as_array().unwrap();
    assert_eq!(outcomes[1]["error"]["code"], "invalid_format");
    assert_eq!(outcomes[2]["error"]["code"], "invalid_url");
    assert_eq!(outcomes[3]["error"]["code"], "alias_exists");

    // The failed lines left nothing behind.
    assert!(common::link_exists(&pool, "good-one").await);
    assert!(!common::link_exists(&pool, "caption").await);
}

#[sqlx::test]
async fn test_bulk_quota_stops_remaining_lines(pool: PgPool) {
    let (state, _rx) = common::create_test_state_with_limits(pool.clone(), 10, 2);
    let server = TestServer::new(bulk_app(state)).unwrap();

    let response = server
        .post("/api/bulk")
        .json(&json!({
            "lines": "One;https://example.com/1\nTwo;https://example.com/2\nThree;https://example.com/3"
        }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["summary"]["successful"], 2);
    assert_eq!(body["summary"]["skipped"], 1);
    assert_eq!(body["outcomes"].as_array().unwrap().len(), 2);

    assert!(!common::link_exists(&pool, "three").await);
}

#[sqlx::test]
async fn test_bulk_csv_export(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(bulk_app(state)).unwrap();

    let response = server
        .post("/api/bulk?format=csv")
        .json(&json!({
            "lines": "My Post;https://example.com/a\nBad Format"
        }))
        .await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );

    let csv = response.text();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"Caption\",\"Original URL\",\"Alias\",\"Shortened URL\""
    );
    assert!(lines.next().unwrap().starts_with("\"My Post\""));
    assert!(lines.next().is_none());
}

#[sqlx::test]
async fn test_bulk_stores_caption_metadata(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(bulk_app(state)).unwrap();

    server
        .post("/api/bulk")
        .json(&json!({ "lines": "My Post;https://example.com/a" }))
        .await
        .assert_status_ok();

    let (caption, source): (Option<String>, Option<String>) = sqlx::query_as(
        "SELECT metadata->>'caption', metadata->>'source' FROM urls WHERE short_code = $1",
    )
    .bind("my-post")
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(caption.as_deref(), Some("My Post"));
    assert_eq!(source.as_deref(), Some("bulk"));
}
