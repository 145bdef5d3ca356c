use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use breed_proxy::{
    config::Config,
    services::{BreedCacheService, FavoritesService},
    upstream::HttpDogApiClient,
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "breed-proxy")]
#[command(version = "0.1.0")]
#[command(about = "A dog breed catalog proxy service with caching, pagination and favorites")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Upstream dog API base URL (overrides config file)
    #[arg(short = 'u', long, value_name = "URL")]
    upstream_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("breed_proxy={},tower_http=trace", cli.log_level)
    } else {
        format!("breed_proxy={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting breed proxy service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from specified file
    std::env::set_var("CONFIG_FILE", &cli.config);
    let mut config = Config::load()?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(upstream_url) = cli.upstream_url {
        config.upstream.base_url = upstream_url;
    }

    info!("Using upstream dog API: {}", config.upstream.base_url);

    // Services are constructed here and injected; nothing is process-global
    let upstream = Arc::new(HttpDogApiClient::new(
        &config.upstream.base_url,
        config.upstream_connect_timeout(),
    )?);
    let cache = BreedCacheService::new(upstream, config.cache_ttl());
    let favorites = FavoritesService::new(cache.clone());
    info!(
        "Breed cache initialized with {}s TTL",
        config.cache.ttl_secs
    );

    let state = AppState::new(cache, favorites);
    let web_server = WebServer::new(&config, state)?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
