mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use sqlx::SqlitePool;
use url_shortener::routes::build_router;

fn make_server(pool: SqlitePool) -> TestServer {
    let config = common::test_config();
    let state = common::create_test_state(pool, &config);
    let app = build_router(state).layer(common::MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: SqlitePool) {
    let server = make_server(pool.clone());
    common::create_test_mapping(&pool, "abcd1234", "https://example.com/target").await;

    let response = server.get("/abcd1234").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_is_repeatable(pool: SqlitePool) {
    let server = make_server(pool.clone());
    common::create_test_mapping(&pool, "again001", "https://example.com/again").await;

    for _ in 0..3 {
        server
            .get("/again001")
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }
}

#[sqlx::test]
async fn test_redirect_not_found(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.get("/doesnotexist").await;

    response.assert_status_not_found();
    response.assert_json(&json!({ "detail": "Short URL not found" }));
}

#[sqlx::test]
async fn test_redirect_expired(pool: SqlitePool) {
    let server = make_server(pool.clone());
    common::create_expired_mapping(&pool, "old00001", "https://example.com/old").await;

    let response = server.get("/old00001").await;

    response.assert_status(StatusCode::GONE);
    response.assert_json(&json!({ "detail": "Short URL expired" }));
}

#[sqlx::test]
async fn test_redirect_is_not_rate_limited(pool: SqlitePool) {
    let server = make_server(pool.clone());
    common::create_test_mapping(&pool, "busy0001", "https://example.com/busy").await;

    for _ in 0..20 {
        server
            .get("/busy0001")
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }
}
