/// Server configuration
use crate::error::{Result, ServerError};
use catalog_client::CatalogConfig;
use messenger_client::MessengerConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix; nested keys are separated by `__`
/// (e.g. `JUKEBOX__CATALOG__CLIENT_ID`)
pub const ENV_PREFIX: &str = "JUKEBOX";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub messenger: MessengerSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessengerSettings {
    /// Shared secret echoed back by the webhook handshake
    #[serde(default)]
    pub verify_token: String,

    #[serde(default)]
    pub page_access_token: String,

    #[serde(default = "default_graph_url")]
    pub graph_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    /// Must match the redirect URI registered for the client
    #[serde(default)]
    pub redirect_uri: String,

    /// Account that owns the jukebox playlist
    #[serde(default)]
    pub owner_id: String,

    /// Name of the shared playlist tracks are queued on
    #[serde(default)]
    pub playlist_name: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_accounts_url")]
    pub accounts_url: String,

    /// Refresh this long before the access token actually expires
    #[serde(default = "default_refresh_margin_secs")]
    pub refresh_margin_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from the given file (required) or `config.toml`
    /// (optional), then apply environment overrides
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (JUKEBOX__SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("messenger.verify_token", &self.messenger.verify_token),
            (
                "messenger.page_access_token",
                &self.messenger.page_access_token,
            ),
            ("catalog.client_id", &self.catalog.client_id),
            ("catalog.client_secret", &self.catalog.client_secret),
            ("catalog.redirect_uri", &self.catalog.redirect_uri),
            ("catalog.owner_id", &self.catalog.owner_id),
            ("catalog.playlist_name", &self.catalog.playlist_name),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ServerError::Config(format!(
                    "{} is required (set {}__{})",
                    key,
                    ENV_PREFIX,
                    key.replace('.', "__").to_uppercase()
                )));
            }
        }

        self.bind_addr()?;
        Ok(())
    }

    /// Socket address to listen on
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip = self
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| ServerError::Config(format!("invalid server.host: {}", e)))?;
        Ok(SocketAddr::from((ip, self.server.port)))
    }

    /// Catalog client settings
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(
            self.catalog.client_id.as_str(),
            self.catalog.client_secret.as_str(),
            self.catalog.redirect_uri.as_str(),
        )
        .with_base_urls(
            self.catalog.api_url.as_str(),
            self.catalog.accounts_url.as_str(),
        )
        .with_timeouts(self.connect_timeout(), self.request_timeout())
    }

    /// Send API client settings
    pub fn messenger_config(&self) -> MessengerConfig {
        MessengerConfig::new(self.messenger.page_access_token.as_str())
            .with_graph_url(self.messenger.graph_url.as_str())
            .with_timeouts(self.connect_timeout(), self.request_timeout())
    }

    /// How long before expiry the access token is refreshed
    pub fn refresh_margin(&self) -> chrono::Duration {
        i64::try_from(self.catalog.refresh_margin_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(chrono::Duration::zero)
    }

    fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.connect_timeout_secs)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.request_timeout_secs)
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_graph_url() -> String {
    messenger_client::DEFAULT_GRAPH_URL.to_string()
}

fn default_api_url() -> String {
    catalog_client::DEFAULT_API_URL.to_string()
}

fn default_accounts_url() -> String {
    catalog_client::DEFAULT_ACCOUNTS_URL.to_string()
}

fn default_refresh_margin_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for MessengerSettings {
    fn default() -> Self {
        Self {
            verify_token: String::new(),
            page_access_token: String::new(),
            graph_url: default_graph_url(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            owner_id: String::new(),
            playlist_name: String::new(),
            api_url: default_api_url(),
            accounts_url: default_accounts_url(),
            refresh_margin_secs: default_refresh_margin_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
