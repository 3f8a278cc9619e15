//! HTTP server command
//!
//! Opens the single database connection, then serves the users routes
//! until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crudapp_server::db::{Connector, DatabaseConfig, MemoryConnector, MySqlConnector};
use crudapp_server::http::{run_server, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CRUDAPP_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins)
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep users in process memory instead of MySQL (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let connector: Arc<dyn Connector> = if args.in_memory {
        tracing::warn!("Serving from in-memory store; nothing is persisted");
        Arc::new(MemoryConnector::new())
    } else {
        let db_config = DatabaseConfig::from(args.db);
        let connector = MySqlConnector::connect(&db_config)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to MySQL at {}:{} (database {})",
                    db_config.host, db_config.port, db_config.database
                )
            })?;
        Arc::new(connector)
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(connector, config).await.context("Server error")?;

    Ok(())
}
