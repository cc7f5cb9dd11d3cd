//! CLI command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Encode and decode records against a dynamodel schema.
#[derive(Debug, Parser)]
#[command(name = "dynamodel")]
#[command(about = "Encode and decode records against a dynamodel schema", long_about = None)]
pub struct Cli {
    /// Schema document (JSON).
    #[arg(long, short, global = true, env = "DYNAMODEL_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply defaults to a record and encode it into a wire item.
    Encode {
        /// Record file (JSON object). Reads stdin when omitted.
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Decode a wire item into a record.
    Decode {
        /// Item file (JSON object of wire fragments). Reads stdin when omitted.
        #[arg(long)]
        item: Option<PathBuf>,
    },
    /// List the indexes the schema declares.
    Indexes,
}
