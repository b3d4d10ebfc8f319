//! Example to run the noughts server standalone
//!
//! Run with: cargo run -p noughts-server --example run_server

use noughts_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::default();

    println!("Starting noughts server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Try: curl -X POST http://localhost:{}/api/sessions", config.port);

    run_server(config).await
}
