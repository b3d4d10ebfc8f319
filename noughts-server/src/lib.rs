//! noughts server - HTTP API for browser front-ends
//!
//! Each campaign lives in memory under a numeric id. The client owns the
//! pacing: after a human move it waits `opponent_delay_ms`, then asks for
//! the opponent's reply; after a finished round it waits `round_delay_ms`,
//! then advances. Anything outside `/api` is served from the catalog
//! directory.

mod routes;
mod state;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use routes::ApiError;
pub use state::{ServerState, SessionEntry};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Catalog page and game assets
    pub static_dir: String,
    /// Base seed for opponent RNGs; `None` seeds each session from entropy
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8003,
            static_dir: "catalog".to_string(),
            seed: None,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn api_routes() -> Router<Arc<ServerState>> {
    use routes::sessions;

    Router::new()
        .route("/status", get(routes::status::status_handler))
        .route("/levels", get(routes::levels::get_levels))
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/sessions/{id}/move", post(sessions::make_move))
        .route("/sessions/{id}/opponent", post(sessions::opponent_move))
        .route("/sessions/{id}/advance", post(sessions::advance))
        .route("/sessions/{id}/restart", post(sessions::restart))
}

/// Build the application: `/api` routes, then the static catalog as fallback
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .with_state(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process is stopped
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(ServerState::with_seed(config.seed));
    let router = create_router(&config, state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        static_dir = %config.static_dir,
        seeded = config.seed.is_some(),
        "noughts server listening"
    );

    axum::serve(listener, router).await?;
    Ok(())
}
