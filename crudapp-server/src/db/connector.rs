//! Connector contract shared by the MySQL and in-memory backends
//!
//! A connector executes one parameterized statement with positional `?`
//! placeholders and reports what happened. Callers never see the driver.

use async_trait::async_trait;
use serde_json::{Map, Value};

/// One result row: column name to value, in column order.
pub type Row = Map<String, Value>;

/// Positional statement argument.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// Result of executing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Rows returned by a `SELECT`
    Rows(Vec<Row>),
    /// Generated primary key of an `INSERT`
    Inserted { id: u64 },
    /// Rows touched by `UPDATE`, `DELETE` or anything else
    Affected(u64),
}

impl QueryOutcome {
    pub fn into_rows(self) -> Result<Vec<Row>, DbError> {
        match self {
            Self::Rows(rows) => Ok(rows),
            other => Err(DbError::UnexpectedOutcome {
                expected: "rows",
                got: other.kind_name(),
            }),
        }
    }

    pub fn into_inserted_id(self) -> Result<u64, DbError> {
        match self {
            Self::Inserted { id } => Ok(id),
            other => Err(DbError::UnexpectedOutcome {
                expected: "inserted id",
                got: other.kind_name(),
            }),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Rows(_) => "rows",
            Self::Inserted { .. } => "inserted id",
            Self::Affected(_) => "affected count",
        }
    }
}

/// Statement category, decided by the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl StatementKind {
    pub fn of(statement: &str) -> Self {
        let keyword = statement
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default();

        if keyword.eq_ignore_ascii_case("select") {
            Self::Select
        } else if keyword.eq_ignore_ascii_case("insert") {
            Self::Insert
        } else if keyword.eq_ignore_ascii_case("update") {
            Self::Update
        } else if keyword.eq_ignore_ascii_case("delete") {
            Self::Delete
        } else {
            Self::Other
        }
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Connection or execution failure, carrying the driver message.
    #[error("{0}")]
    Driver(String),

    /// Generated key does not fit a signed 64-bit id.
    #[error("generated id {0} is out of range")]
    IdOutOfRange(String),

    #[error("unsupported statement: {0}")]
    Unsupported(String),

    #[error("expected {expected} from statement, got {got}")]
    UnexpectedOutcome {
        expected: &'static str,
        got: &'static str,
    },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) => Self::Driver(db.message().to_owned()),
            other => Self::Driver(other.to_string()),
        }
    }
}

/// Executes parameterized statements against the users store.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Short backend name reported by `/health`.
    fn backend(&self) -> &'static str;

    async fn execute(&self, statement: &str, params: &[SqlValue]) -> Result<QueryOutcome, DbError>;
}
