//! MySQL connector backed by a single sqlx connection
//!
//! The connection is opened once at startup and shared by every handler.
//! Calls are serialized on it through an async mutex.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::types::chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{Column, ConnectOptions, Row as _, TypeInfo};
use tokio::sync::Mutex;

use super::connector::{Connector, DbError, QueryOutcome, Row, SqlValue, StatementKind};

/// Connection settings. Defaults match the stock local install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: "mysql".to_string(),
            database: "CRUD_APP".to_string(),
        }
    }
}

impl DatabaseConfig {
    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Connector owning one persistent MySQL connection.
pub struct MySqlConnector {
    conn: Mutex<MySqlConnection>,
}

impl MySqlConnector {
    /// Open the connection.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Driver` if the server is unreachable or rejects
    /// the credentials.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let conn = config.connect_options().connect().await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connected to MySQL"
        );
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Round-trip a trivial query to confirm the connection is usable.
    pub async fn ping(&self) -> Result<(), DbError> {
        self.execute("SELECT 1", &[]).await.map(|_| ())
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<QueryOutcome, DbError> {
        let mut query = sqlx::query(statement);
        for param in params {
            query = match param {
                SqlValue::Null => query.bind(None::<String>),
                SqlValue::Int(i) => query.bind(*i),
                SqlValue::Text(s) => query.bind(s.as_str()),
            };
        }

        let mut conn = self.conn.lock().await;
        tracing::debug!(statement, params = params.len(), "executing");

        match StatementKind::of(statement) {
            StatementKind::Select => {
                let rows = query.fetch_all(&mut *conn).await?;
                Ok(QueryOutcome::Rows(rows.iter().map(row_to_json).collect()))
            }
            StatementKind::Insert => {
                let done = query.execute(&mut *conn).await?;
                Ok(QueryOutcome::Inserted {
                    id: done.last_insert_id(),
                })
            }
            _ => {
                let done = query.execute(&mut *conn).await?;
                Ok(QueryOutcome::Affected(done.rows_affected()))
            }
        }
    }
}

/// Map a MySQL row to a JSON object keyed by column name.
///
/// Temporal columns become ISO-8601 strings and DECIMAL keeps its exact
/// text. A value that still cannot be decoded is written as null.
fn row_to_json(row: &MySqlRow) -> Row {
    let mut out = Row::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let type_name = column.type_info().name();

        let decoded = match type_name {
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
                .try_get::<Option<i64>, _>(idx)
                .map(|v| v.map(Value::from)),
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => row
                .try_get::<Option<u64>, _>(idx)
                .map(|v| v.map(Value::from)),
            "BOOLEAN" => row
                .try_get::<Option<bool>, _>(idx)
                .map(|v| v.map(Value::from)),
            "FLOAT" | "DOUBLE" => row
                .try_get::<Option<f64>, _>(idx)
                .map(|v| v.map(Value::from)),
            "DATETIME" | "TIMESTAMP" => row
                .try_get::<Option<NaiveDateTime>, _>(idx)
                .map(|v| v.map(|t| Value::from(t.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))),
            "DATE" => row
                .try_get::<Option<NaiveDate>, _>(idx)
                .map(|v| v.map(|d| Value::from(d.to_string()))),
            "TIME" => row
                .try_get::<Option<NaiveTime>, _>(idx)
                .map(|v| v.map(|t| Value::from(t.to_string()))),
            // Sent as text on the wire; keeps full precision.
            "DECIMAL" => row
                .try_get_unchecked::<Option<String>, _>(idx)
                .map(|v| v.map(Value::from)),
            _ => row
                .try_get::<Option<String>, _>(idx)
                .map(|v| v.map(Value::from)),
        };

        let value = decoded.unwrap_or_else(|err| {
            tracing::warn!(
                column = column.name(),
                type_name,
                error = %err,
                "cannot decode column, returning null"
            );
            None
        });

        out.insert(column.name().to_owned(), value.unwrap_or(Value::Null));
    }

    out
}
