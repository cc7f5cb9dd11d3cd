//! dynamodel_cli - command line front end for dynamodel schemas.

pub mod cli;
pub mod commands;
pub mod document;
pub mod error;
pub mod output;

pub use document::SchemaDocument;
pub use error::{CliError, Result};
