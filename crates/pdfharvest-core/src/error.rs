//! Error types for the schema layer.
//!
//! A [`SchemaError`] is fatal: extraction never starts with a broken
//! or missing schema. Everything downstream of the schema degrades to
//! partial output instead of erroring (see the extraction engine).

use std::fmt;

/// Fatal schema errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The schema resource could not be found.
    NotFound(String),
    /// The schema resource exists but cannot be understood.
    Malformed(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::NotFound(name) => write!(f, "schema not found: {name}"),
            SchemaError::Malformed(msg) => write!(f, "malformed schema: {msg}"),
        }
    }
}

impl std::error::Error for SchemaError {}
