//! Web layer module
//!
//! HTTP interface for the breed proxy. Handlers are thin: they parse the
//! request, delegate to the service layer, and map results and errors onto
//! the wire contract. All state is injected through [`AppState`]; nothing is
//! process-global.

use anyhow::Result;
use axum::{
    routing::{delete, get},
    Router,
};
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::services::{BreedCacheService, BreedQueryEngine, FavoritesService};

pub mod handlers;
pub mod responses;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: BreedCacheService,
    pub query_engine: BreedQueryEngine,
    pub favorites: FavoritesService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(cache: BreedCacheService, favorites: FavoritesService) -> Self {
        Self {
            cache,
            query_engine: BreedQueryEngine::new(),
            favorites,
            started_at: Instant::now(),
        }
    }
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, state: AppState) -> Result<Self> {
        let app = create_router(state);
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;

        Ok(Self { app, addr })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(handlers::health::health_check))
        .route("/breeds", get(handlers::breeds::list_breeds))
        .route("/breeds/:breed/images", get(handlers::breeds::breed_images))
        .route(
            "/favorites",
            get(handlers::favorites::list_favorites).post(handlers::favorites::add_favorite),
        )
        .route(
            "/favorites/:breed",
            delete(handlers::favorites::remove_favorite),
        )
        .fallback(handlers::index::not_found)
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
