//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field absent or null
    Missing { field: &'static str },

    /// Field present but blank
    Empty { field: &'static str },

    /// Field has the wrong JSON type
    InvalidType { field: &'static str, expected: &'static str },

    /// Value doesn't parse (e.g., path id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be read as JSON
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidType { field, expected } => {
                write!(f, "{} must be a {}", field, expected)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::MalformedBody { reason } => write!(f, "invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
