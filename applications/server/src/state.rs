/// Shared application state
use crate::config::ServerConfig;
use jukebox_bot::{CatalogGateway, EventRouter, TokenLifecycle};
use jukebox_core::{CatalogApi, MessagingTransport};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EventRouter>,
    pub gateway: Arc<CatalogGateway>,
    pub verify_token: Arc<str>,
}

impl AppState {
    pub fn new(
        router: Arc<EventRouter>,
        gateway: Arc<CatalogGateway>,
        verify_token: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            router,
            gateway,
            verify_token: verify_token.into(),
        }
    }

    /// Wire the bot around the given remote clients.
    ///
    /// The process starts unauthorized; the OAuth redirect installs the first
    /// credential.
    pub fn with_clients(
        catalog: Arc<dyn CatalogApi>,
        messenger: Arc<dyn MessagingTransport>,
        config: &ServerConfig,
    ) -> Self {
        let tokens = Arc::new(
            TokenLifecycle::new(Arc::clone(&catalog)).with_refresh_margin(config.refresh_margin()),
        );
        let gateway = Arc::new(CatalogGateway::new(
            catalog,
            tokens,
            config.catalog.owner_id.as_str(),
            config.catalog.playlist_name.as_str(),
        ));
        let router = Arc::new(EventRouter::new(Arc::clone(&gateway), messenger));

        Self::new(router, gateway, config.messenger.verify_token.as_str())
    }
}
