#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use atomzr::domain::click_event::ClickEvent;
use atomzr::prelude::*;

pub const TEST_BASE_URL: &str = "https://s.atomzr.test";

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_test_state_with_limits(pool, 10, 50)
}

pub fn create_test_state_with_limits(
    pool: PgPool,
    single_limit: u32,
    bulk_limit: u32,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let quota = Arc::new(DailyQuota::new(single_limit, bulk_limit));

    let state = AppState::new(
        pool,
        tx,
        quota,
        TEST_BASE_URL.to_string(),
        "test-signing-secret".to_string(),
    );

    (state, rx)
}

pub fn anonymous() -> ClientIdentity {
    ClientIdentity::anonymous("127.0.0.1".parse().unwrap())
}

pub fn authenticated(key_id: i64) -> ClientIdentity {
    ClientIdentity::authenticated(key_id)
}

pub async fn insert_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (short_code, original_url) VALUES ($1, $2) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_owned_link(pool: &PgPool, code: &str, url: &str, owner_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (short_code, original_url, owner_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_api_key(pool: &PgPool, label: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO api_keys (label, token_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(label)
    .bind(format!("hash-of-{label}"))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM urls WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_exists(pool: &PgPool, code: &str) -> bool {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap();

    count > 0
}
