//! HTTP server command for the formctl API
//!
//! Opens (and migrates) the database, then serves `/api/formapi` until Ctrl+C.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use formctl_core::FormctlConfig;
use formctl_server::db;
use formctl_server::http::{run_server, ServerConfig};

use super::{load_config, resolve_database_url};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5080)
    #[arg(long, short = 'b', env = "FORMCTL_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

fn server_config(args: &ServeArgs, config: &FormctlConfig) -> Result<ServerConfig> {
    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => config
            .bind()
            .parse()
            .with_context(|| format!("Invalid bind address in config: {}", config.bind()))?,
    };

    Ok(ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive || config.cors_permissive(),
    })
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = load_config()?;
    let server = server_config(&args, &config)?;
    let database_url = resolve_database_url(args.database_url, &config);

    tracing::info!("Starting formctl server on {}", server.bind_addr);

    let pool = db::open(&database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;

    // Blocks until shutdown
    run_server(pool, server).await.context("Server error")?;

    Ok(())
}
