//! Connectivity check: open a connection and run `SELECT 1`.

use anyhow::{Context, Result};
use clap::Parser;

use crudapp_server::db::{DatabaseConfig, MySqlConnector};

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct PingArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_ping(args: PingArgs) -> Result<()> {
    let config = DatabaseConfig::from(args.db);

    let connector = MySqlConnector::connect(&config)
        .await
        .context("Failed to connect to MySQL")?;
    connector.ping().await.context("SELECT 1 failed")?;

    println!(
        "ok: {}@{}:{}/{}",
        config.user, config.host, config.port, config.database
    );
    Ok(())
}
