//! HTTP server command
//!
//! Connects the database pool, serves the companies/invoices API,
//! and closes the pool once a shutdown signal has drained requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use biztime_server::{run_server, Database, DatabaseConfig, ServerConfig};
use clap::Parser;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (also read from DATABASE_URL or a .env file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "BIZTIME_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a free connection before failing a request
    #[arg(long, env = "BIZTIME_ACQUIRE_TIMEOUT", default_value_t = 5)]
    pub acquire_timeout: u64,
}

impl ServeArgs {
    fn database_config(&self) -> Result<DatabaseConfig> {
        let url = self
            .database_url
            .clone()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        Ok(DatabaseConfig {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout),
            ..DatabaseConfig::new(url)
        })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args.database_config()?;

    tracing::info!("Starting biztime server on {}", args.bind);

    let db = Database::connect(&db_config)
        .await
        .context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown; closes the pool on the way out
    run_server(db, config).await.context("Server error")?;

    Ok(())
}
