//! Database layer - connector contract and the users repository
//!
//! # Design Principles
//!
//! - One persistent connection per process, injected as `Arc<dyn Connector>`
//! - Every handler issues exactly one parameterized statement
//! - No retry, no reconnection, no transactions

pub mod connector;
pub mod memory;
pub mod mysql;
pub mod repos;

pub use connector::{Connector, DbError, QueryOutcome, Row, SqlValue, StatementKind};
pub use memory::MemoryConnector;
pub use mysql::{DatabaseConfig, MySqlConnector};
pub use repos::UserRepo;
