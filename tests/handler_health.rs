mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use sqlx::SqlitePool;
use url_shortener::routes::build_router;

#[sqlx::test]
async fn test_health_endpoint_success(pool: SqlitePool) {
    let config = common::test_config();
    let server = TestServer::new(build_router(common::create_test_state(pool, &config))).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
}

#[sqlx::test]
async fn test_health_endpoint_degraded_when_store_closed(pool: SqlitePool) {
    let config = common::test_config();
    let server =
        TestServer::new(build_router(common::create_test_state(pool.clone(), &config))).unwrap();

    pool.close().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
