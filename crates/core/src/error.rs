//! Schema definition errors and the failures of the encode and decode paths.

use thiserror::Error;

use crate::attribute::LogicalType;

/// Errors raised while building a schema. These are configuration defects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid attribute type: {0}")]
    InvalidType(String),
    #[error("Duplicate attribute name: {0}")]
    DuplicateAttribute(String),
    #[error("Invalid index name on attribute {attribute}: {name:?}")]
    InvalidIndexName { attribute: String, name: String },
    #[error("Duplicate index names: {0}")]
    DuplicateIndex(String),
    #[error("Invalid index throughput on {index}: read={read:?}, write={write:?}")]
    InvalidThroughput {
        index: String,
        read: Option<u64>,
        write: Option<u64>,
    },
}

/// Errors raised while encoding a single attribute value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required value missing: {0}")]
    Required(String),
    #[error("Values must be array: {0}")]
    NotASequence(String),
    #[error("Validation failed: {0}")]
    Failed(String),
    #[error("Invalid {expected} value for {attribute}: {value}")]
    TypeMismatch {
        attribute: String,
        expected: LogicalType,
        value: String,
    },
}

/// Errors raised while decoding wire data back into native values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed {expected} value for {attribute}: {value} ({reason})")]
    Malformed {
        attribute: String,
        expected: LogicalType,
        value: String,
        reason: String,
    },
    #[error("Unsupported attribute value: {0}")]
    UnsupportedAttributeValue(String),
}

/// Result type for schema construction.
pub type Result<T> = std::result::Result<T, SchemaError>;
