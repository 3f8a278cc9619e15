//! Domain models with validation at construction
//!
//! Request input is checked when building these types, before any SQL
//! statement exists. Invalid input returns ValidationError, not panic.

pub mod user;
pub mod validation;

pub use user::{parse_user_id, FormPayload, UpdatedUser, User, UserFields, UserPayload};
pub use validation::ValidationError;
