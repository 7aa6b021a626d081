#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use url_shortener::api::middleware::rate_limit::ClientRateLimiter;
use url_shortener::application::services::{LinkService, LinkSettings};
use url_shortener::config::Config;
use url_shortener::domain::entities::Mapping;
use url_shortener::domain::repositories::MappingRepository;
use url_shortener::infrastructure::http::HttpUrlValidator;
use url_shortener::infrastructure::persistence::SqliteMappingRepository;
use url_shortener::state::AppState;

/// Config with reachability checks turned off, so tests never hit the network.
pub fn test_config() -> Config {
    Config {
        verify_reachability: false,
        ..Config::default()
    }
}

pub fn create_test_state(pool: SqlitePool, config: &Config) -> AppState {
    let repository = Arc::new(SqliteMappingRepository::new(Arc::new(pool)));
    let validator = Arc::new(HttpUrlValidator::from_config(config).unwrap());
    let link_service = Arc::new(LinkService::new(
        repository,
        validator,
        LinkSettings::from_config(config).unwrap(),
    ));
    let rate_limiter = Arc::new(ClientRateLimiter::from_config(config).unwrap());

    AppState::new(link_service, rate_limiter)
}

pub async fn create_test_mapping(pool: &SqlitePool, id: &str, url: &str) {
    insert_mapping(pool, id, url, Duration::days(30)).await;
}

pub async fn create_expired_mapping(pool: &SqlitePool, id: &str, url: &str) {
    insert_mapping(pool, id, url, Duration::hours(-1)).await;
}

async fn insert_mapping(pool: &SqlitePool, id: &str, url: &str, ttl: Duration) {
    let repo = SqliteMappingRepository::new(Arc::new(pool.clone()));
    repo.insert(Mapping::new(id.to_string(), url.to_string(), Utc::now(), ttl))
        .await
        .unwrap();
}

/// Stamps every request with a fixed peer address, as the server does via
/// `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
