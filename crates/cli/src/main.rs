//! dynamodel CLI entry point.

use anyhow::Context;
use clap::Parser;
use dynamodel_cli::cli::{Cli, Commands, OutputFormat};
use dynamodel_cli::commands::{decode_item, encode_record, index_report, read_json};
use dynamodel_cli::output::{format_json, pretty};
use dynamodel_cli::SchemaDocument;
use dynamodel_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dynamodel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let schema_path = cli
        .schema
        .as_deref()
        .context("No schema given. Pass --schema or set DYNAMODEL_SCHEMA")?;
    let document = SchemaDocument::load(schema_path)
        .with_context(|| format!("Failed to load schema {}", schema_path.display()))?;
    let table = document.table.clone();
    let schema = document.into_schema(&config)?;

    match cli.command {
        Commands::Encode { record } => {
            let input = read_json(record.as_deref())?;
            let item = encode_record(&schema, input)?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_json(&item)),
                OutputFormat::Pretty => println!("{}", pretty::format_item(&item)),
            }
        }
        Commands::Decode { item } => {
            let input = read_json(item.as_deref())?;
            let record = decode_item(&schema, input)?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_json(&record)),
                OutputFormat::Pretty => println!("{}", pretty::format_record(&record)),
            }
        }
        Commands::Indexes => {
            let report = index_report(&config, &table, &schema);
            match cli.format {
                OutputFormat::Json => println!("{}", format_json(&report)),
                OutputFormat::Pretty => println!("{}", pretty::format_indexes(&report)),
            }
        }
    }

    Ok(())
}
