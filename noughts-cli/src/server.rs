//! Serve command - host the JSON API and the game catalog
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to noughts-server crate)
//! - Level 4: catalog checks

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use noughts_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Catalog directory served for paths outside /api
    #[arg(long, default_value = "catalog")]
    pub static_dir: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: ServerArgs, seed: Option<u64>) -> Result<()> {
    let config = configure_server(&args, seed)?;
    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn configure_server(args: &ServerArgs, seed: Option<u64>) -> Result<ServerConfig> {
    check_catalog(&args.static_dir)?;

    let static_dir = args
        .static_dir
        .to_str()
        .with_context(|| format!("Static directory is not UTF-8: {}", args.static_dir.display()))?
        .to_string();

    Ok(ServerConfig {
        host: args.host,
        port: args.port,
        static_dir,
        seed,
    })
}

/// Blocks on a fresh multi-threaded runtime
fn start_server(config: ServerConfig) -> Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?
        .block_on(run_server(config))
}

// ============================================================================
// LEVEL 4 - CATALOG CHECKS
// ============================================================================

/// A missing catalog only disables the browser pages; a file in its place is a mistake
fn check_catalog(dir: &Path) -> Result<()> {
    if dir.is_file() {
        anyhow::bail!("--static-dir points at a file: {}", dir.display());
    }
    if !dir.is_dir() {
        tracing::warn!("No catalog at {}; only /api will respond", dir.display());
    } else if !dir.join("index.html").is_file() {
        tracing::warn!("{} has no index.html", dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(static_dir: &str) -> ServerArgs {
        ServerArgs {
            host: "127.0.0.1".parse().unwrap(),
            port: 9100,
            static_dir: PathBuf::from(static_dir),
        }
    }

    #[test]
    fn test_configure_server_carries_args_and_seed() {
        let config = configure_server(&args("test_static"), Some(3)).unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:9100");
        assert_eq!(config.static_dir, "test_static");
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_missing_catalog_is_allowed() {
        assert!(check_catalog(Path::new("/nonexistent/catalog")).is_ok());
    }

    #[test]
    fn test_file_as_catalog_rejected() {
        let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
        assert!(configure_server(&args(manifest), None).is_err());
    }
}
