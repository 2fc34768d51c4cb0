/// Jukebox Server - messaging webhook for the shared catalog playlist
use catalog_client::{CatalogClient, DEFAULT_SCOPES};
use clap::{Parser, Subcommand};
use jukebox_server::{api, config::ServerConfig, state::AppState};
use messenger_client::MessengerClient;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jukebox-server")]
#[command(about = "Chat bot that queues tracks on a shared playlist", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "JUKEBOX_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the URL the playlist owner visits to authorize the bot
    AuthorizeUrl {
        /// Configuration file path
        #[arg(short, long, env = "JUKEBOX_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "jukebox_server=info,jukebox_bot=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::AuthorizeUrl { config } => {
            let config = ServerConfig::load_from(config.as_deref())?;
            let catalog = CatalogClient::new(config.catalog_config())?;
            println!("{}", catalog.authorize_url(DEFAULT_SCOPES, None)?);
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load_from(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Jukebox Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize remote clients
    let catalog = Arc::new(CatalogClient::new(config.catalog_config())?);
    let messenger = Arc::new(MessengerClient::new(config.messenger_config())?);

    tracing::info!(
        url = %catalog.authorize_url(DEFAULT_SCOPES, None)?,
        "Visit to authorize the jukebox"
    );

    // Build application state
    let app_state = AppState::with_clients(catalog, messenger, &config);

    // Build router
    let app = api::create_router(app_state);

    let addr = config.bind_addr()?;
    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
