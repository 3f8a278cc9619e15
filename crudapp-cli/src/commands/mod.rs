//! Command implementations for the crudapp CLI

pub mod ping;
pub mod serve;

pub use ping::run_ping;
pub use serve::run_serve;

use clap::Args;
use crudapp_server::db::DatabaseConfig;

/// MySQL connection flags shared by every command that opens a connection
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database host
    #[arg(long = "db-host", env = "CRUDAPP_DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database port
    #[arg(long = "db-port", env = "CRUDAPP_DB_PORT", default_value_t = 3306)]
    pub port: u16,

    /// Database user
    #[arg(long = "db-user", env = "CRUDAPP_DB_USER", default_value = "root")]
    pub user: String,

    /// Database password
    #[arg(
        long = "db-password",
        env = "CRUDAPP_DB_PASSWORD",
        default_value = "mysql",
        hide_env_values = true
    )]
    pub password: String,

    /// Database (schema) name
    #[arg(long = "db-name", env = "CRUDAPP_DB_NAME", default_value = "CRUD_APP")]
    pub database: String,
}

impl From<DatabaseArgs> for DatabaseConfig {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            user: args.user,
            password: args.password,
            database: args.database,
        }
    }
}
