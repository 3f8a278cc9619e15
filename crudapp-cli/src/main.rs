//! crudapp CLI - users CRUD service
//!
//! Entry point for the `crudapp` binary:
//! - `serve`: run the HTTP API on port 3000
//! - `ping`: check database credentials

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "crudapp",
    author,
    version,
    about = "Users CRUD over HTTP, backed by a single MySQL connection"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Connect to the database and run SELECT 1
    Ping(commands::ping::PingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })
        .context("Failed to initialize tracing")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Ping(args) => commands::run_ping(args).await?,
    }
    Ok(())
}
