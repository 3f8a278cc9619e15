//! In-memory connector
//!
//! Understands exactly the statements issued by [`UserRepo`](super::UserRepo)
//! and keeps the table in a `BTreeMap`, so handlers can be exercised without
//! a MySQL server. Ids start at 1 and are never reused.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::connector::{Connector, DbError, QueryOutcome, Row, SqlValue};
use super::repos::users::{DELETE_USER, INSERT_USER, SELECT_USERS, UPDATE_USER};

#[derive(Debug, Clone)]
struct StoredUser {
    name: String,
    email: String,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, StoredUser>,
    last_id: i64,
}

/// Connector holding the `users` table in process memory.
#[derive(Debug, Default)]
pub struct MemoryConnector {
    table: Mutex<Table>,
    failure: Option<String>,
    executed: AtomicUsize,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose every call fails with the given driver message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of statements received so far, including failed ones.
    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<QueryOutcome, DbError> {
        self.executed.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = &self.failure {
            return Err(DbError::Driver(message.clone()));
        }

        let normalized = normalize(statement);
        let mut table = self.table.lock().await;

        if normalized == normalize(SELECT_USERS) {
            expect_params(params, 0)?;
            let rows = table
                .rows
                .iter()
                .map(|(id, user)| user_row(*id, user))
                .collect();
            Ok(QueryOutcome::Rows(rows))
        } else if normalized == normalize(INSERT_USER) {
            expect_params(params, 2)?;
            let user = StoredUser {
                name: text_column("name", &params[0])?,
                email: text_column("email", &params[1])?,
            };
            let id = table.last_id + 1;
            let generated =
                u64::try_from(id).map_err(|_| DbError::IdOutOfRange(id.to_string()))?;
            table.last_id = id;
            table.rows.insert(id, user);
            Ok(QueryOutcome::Inserted { id: generated })
        } else if normalized == normalize(UPDATE_USER) {
            expect_params(params, 3)?;
            let name = text_column("name", &params[0])?;
            let email = text_column("email", &params[1])?;
            let affected = match key(&params[2]).and_then(|id| table.rows.get_mut(&id)) {
                Some(user) => {
                    *user = StoredUser { name, email };
                    1
                }
                None => 0,
            };
            Ok(QueryOutcome::Affected(affected))
        } else if normalized == normalize(DELETE_USER) {
            expect_params(params, 1)?;
            let removed = key(&params[0]).and_then(|id| table.rows.remove(&id));
            Ok(QueryOutcome::Affected(u64::from(removed.is_some())))
        } else {
            Err(DbError::Unsupported(statement.to_owned()))
        }
    }
}

fn normalize(statement: &str) -> String {
    statement.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn expect_params(params: &[SqlValue], expected: usize) -> Result<(), DbError> {
    if params.len() == expected {
        Ok(())
    } else {
        Err(DbError::Driver(format!(
            "Incorrect arguments to mysqld_stmt_execute: expected {}, got {}",
            expected,
            params.len()
        )))
    }
}

/// Mirrors the NOT NULL constraint on `name` and `email`.
fn text_column(column: &str, value: &SqlValue) -> Result<String, DbError> {
    match value {
        SqlValue::Text(s) => Ok(s.clone()),
        SqlValue::Int(i) => Ok(i.to_string()),
        SqlValue::Null => Err(DbError::Driver(format!("Column '{}' cannot be null", column))),
    }
}

fn key(value: &SqlValue) -> Option<i64> {
    match value {
        SqlValue::Int(i) => Some(*i),
        SqlValue::Text(s) => s.trim().parse().ok(),
        SqlValue::Null => None,
    }
}

fn user_row(id: i64, user: &StoredUser) -> Row {
    let mut row = Row::new();
    row.insert("id".to_owned(), Value::from(id));
    row.insert("name".to_owned(), Value::from(user.name.clone()));
    row.insert("email".to_owned(), Value::from(user.email.clone()));
    row
}
