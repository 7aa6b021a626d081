mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use sqlx::SqlitePool;
use url_shortener::config::Config;
use url_shortener::routes::build_router;

fn make_server(pool: SqlitePool, config: Config) -> TestServer {
    let state = common::create_test_state(pool, &config);
    let app = build_router(state).layer(common::MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_sixth_request_is_limited(pool: SqlitePool) {
    let server = make_server(pool, common::test_config());
    let body = json!({ "original_url": "https://example.com" });

    for _ in 0..5 {
        server.post("/shorten").json(&body).await.assert_status_ok();
    }

    let response = server.post("/shorten").json(&body).await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    response.assert_json(&json!({ "detail": "Rate limit exceeded: 5 per 1 minute" }));

    let retry_after: u64 = response
        .header("retry-after")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=12).contains(&retry_after));
}

#[sqlx::test]
async fn test_rejected_urls_consume_quota(pool: SqlitePool) {
    let server = make_server(pool, common::test_config());

    for _ in 0..5 {
        server
            .post("/shorten")
            .json(&json!({ "original_url": "not a url" }))
            .await
            .assert_status_ok();
    }

    server
        .post("/shorten")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test]
async fn test_limit_is_configurable(pool: SqlitePool) {
    let config = Config {
        rate_limit_per_minute: 2,
        ..common::test_config()
    };
    let server = make_server(pool, config);
    let body = json!({ "original_url": "https://example.com" });

    server.post("/shorten").json(&body).await.assert_status_ok();
    server.post("/shorten").json(&body).await.assert_status_ok();

    let response = server.post("/shorten").json(&body).await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    response.assert_json(&json!({ "detail": "Rate limit exceeded: 2 per 1 minute" }));
}

#[sqlx::test]
async fn test_clients_are_limited_separately_behind_proxy(pool: SqlitePool) {
    let config = Config {
        rate_limit_per_minute: 1,
        behind_proxy: true,
        ..common::test_config()
    };
    let server = make_server(pool, config);
    let body = json!({ "original_url": "https://example.com" });

    server
        .post("/shorten")
        .add_header("x-forwarded-for", "203.0.113.1")
        .json(&body)
        .await
        .assert_status_ok();
    server
        .post("/shorten")
        .add_header("x-forwarded-for", "203.0.113.1")
        .json(&body)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    server
        .post("/shorten")
        .add_header("x-forwarded-for", "203.0.113.2")
        .json(&body)
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_missing_client_address_is_server_error(pool: SqlitePool) {
    let config = common::test_config();
    let server = TestServer::new(build_router(common::create_test_state(pool, &config))).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "detail": "Internal server error" }));
}
