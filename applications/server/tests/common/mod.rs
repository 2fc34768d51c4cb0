//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::Router;
use catalog_client::CatalogClient;
use jukebox_server::{api, config::ServerConfig, state::AppState};
use messenger_client::MessengerClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const VERIFY_TOKEN: &str = "verify-me";
pub const MESSAGES_PATH: &str = "/v2.6/me/messages";

/// Server wired to mock catalog and Graph API servers
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub catalog: MockServer,
    pub graph: MockServer,
}

pub async fn spawn_app() -> TestApp {
    let catalog = MockServer::start().await;
    let graph = MockServer::start().await;

    let mut config = ServerConfig::default();
    config.messenger.verify_token = VERIFY_TOKEN.to_string();
    config.messenger.page_access_token = "page-token".to_string();
    config.messenger.graph_url = graph.uri();
    config.catalog.client_id = "client-id".to_string();
    config.catalog.client_secret = "client-secret".to_string();
    config.catalog.redirect_uri = "https://bot.example/spotify".to_string();
    config.catalog.owner_id = "owner".to_string();
    config.catalog.playlist_name = "Jukebox".to_string();
    config.catalog.api_url = catalog.uri();
    config.catalog.accounts_url = catalog.uri();
    config.validate().unwrap();

    let catalog_client = Arc::new(CatalogClient::new(config.catalog_config()).unwrap());
    let messenger = Arc::new(MessengerClient::new(config.messenger_config()).unwrap());
    let state = AppState::with_clients(catalog_client, messenger, &config);
    let app = api::create_router(state.clone());

    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"recipient_id": "u1"})))
        .mount(&graph)
        .await;

    TestApp {
        app,
        state,
        catalog,
        graph,
    }
}

/// Accept the code exchange and list an existing jukebox playlist
pub async fn mount_authorization(catalog: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-1"
        })))
        .mount(catalog)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "jukebox-pl", "name": "Jukebox"}],
            "total": 1
        })))
        .mount(catalog)
        .await;
}

/// Wait until `server` has seen at least `count` requests to `path`
pub async fn wait_for_requests(server: &MockServer, path: &str, count: usize) -> Vec<Request> {
    for _ in 0..200 {
        let requests: Vec<Request> = server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == path)
            .collect();
        if requests.len() >= count {
            return requests;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {} requests to {}", count, path);
}

/// Wait until the jukebox playlist has been resolved
pub async fn wait_for_authorization(state: &AppState) {
    for _ in 0..200 {
        if state.gateway.cached_jukebox_playlist().is_some() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for authorization");
}

pub fn text_delivery(sender: &str, text: &str) -> serde_json::Value {
    json!({
        "object": "page",
        "entry": [{
            "id": "page-1",
            "time": 1_700_000_000_000_i64,
            "messaging": [{
                "sender": {"id": sender},
                "recipient": {"id": "page-1"},
                "timestamp": 1_700_000_000_000_i64,
                "message": {"mid": "m1", "text": text}
            }]
        }]
    })
}
