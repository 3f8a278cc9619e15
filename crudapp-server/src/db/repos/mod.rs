//! Repository implementations for database access
//!
//! Each repository method issues exactly one parameterized statement.

pub mod users;

pub use users::UserRepo;
