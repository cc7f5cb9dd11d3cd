//! CLI error types.

use dynamodel_core::{DecodeError, SchemaError, ValidationError};
use thiserror::Error;

/// Result type alias for the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running a CLI command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid validation pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
