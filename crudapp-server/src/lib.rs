//! crudapp-server: users CRUD over HTTP
//!
//! Translates four HTTP routes into parameterized SQL statements against a
//! fixed `users(id, name, email)` table and returns the results as JSON.

pub mod db;
pub mod http;
pub mod models;

pub use db::{Connector, DbError, MemoryConnector, MySqlConnector};
pub use http::{build_router, run_server, ApiError, ServerConfig};
