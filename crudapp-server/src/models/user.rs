//! User entity and request validation
//!
//! `name` and `email` must be present, be strings and be non-blank. Values
//! are kept exactly as sent; there is no email format or uniqueness check.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ValidationError;

/// A user as echoed back by create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Update echo. `id` is the path segment exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UpdatedUser {
    pub fn new(raw_id: impl Into<String>, fields: UserFields) -> Self {
        let (name, email) = fields.into_parts();
        Self {
            id: raw_id.into(),
            name,
            email,
        }
    }
}

/// Raw create/update body. Fields stay untyped until validated.
#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
}

/// `application/x-www-form-urlencoded` body. Every form value is text.
#[derive(Debug, Default, Deserialize)]
pub struct FormPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<FormPayload> for UserPayload {
    fn from(form: FormPayload) -> Self {
        Self {
            name: form.name.map(Value::String),
            email: form.email.map(Value::String),
        }
    }
}

/// Validated name and email for an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    name: String,
    email: String,
}

impl UserFields {
    /// Validate name and email.
    ///
    /// # Example
    /// ```
    /// use crudapp_server::models::UserFields;
    /// use serde_json::json;
    ///
    /// assert!(UserFields::new(Some(json!("Ada")), Some(json!("ada@x.com"))).is_ok());
    /// assert!(UserFields::new(Some(json!("Ada")), None).is_err());
    /// assert!(UserFields::new(Some(json!(42)), Some(json!("ada@x.com"))).is_err());
    /// ```
    pub fn new(name: Option<Value>, email: Option<Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_string("name", name)?,
            email: required_string("email", email)?,
        })
    }

    pub fn from_payload(payload: UserPayload) -> Result<Self, ValidationError> {
        Self::new(payload.name, payload.email)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Consume and return `(name, email)`.
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.email)
    }
}

fn required_string(field: &'static str, value: Option<Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Missing { field }),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationError::Empty { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::InvalidType {
            field,
            expected: "string",
        }),
    }
}

/// Parse a path id. Only positive integers name a row.
pub fn parse_user_id(raw: &str) -> Result<i64, ValidationError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a positive integer",
        }),
        Err(_) => Err(ValidationError::InvalidFormat {
            field: "id",
            reason: "must be an integer",
        }),
    }
}
