use std::env;

use crate::index::Throughput;

/// Schema defaults loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Table throughput used when a schema does not declare one (default: 1/1)
    pub table_throughput: Throughput,
    /// Prefix prepended to every table name (default: "")
    pub table_prefix: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODEL_READ_THROUGHPUT` - Default table read capacity (default: 1)
    /// - `DYNAMODEL_WRITE_THROUGHPUT` - Default table write capacity (default: 1)
    /// - `DYNAMODEL_TABLE_PREFIX` - Table name prefix (default: "")
    ///
    /// Capacities below 1 or that fail to parse fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Throughput::default();
        Self {
            table_throughput: Throughput::new(
                capacity_from_env("DYNAMODEL_READ_THROUGHPUT").unwrap_or(defaults.read),
                capacity_from_env("DYNAMODEL_WRITE_THROUGHPUT").unwrap_or(defaults.write),
            ),
            table_prefix: env::var("DYNAMODEL_TABLE_PREFIX").unwrap_or_default(),
        }
    }

    /// The full table name for a model, with the configured prefix.
    pub fn table_name(&self, name: &str) -> String {
        format!("{}{}", self.table_prefix, name)
    }

    pub fn table_throughput(&self) -> Throughput {
        self.table_throughput
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn capacity_from_env(key: &str) -> Option<u64> {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| *v >= 1)
}
