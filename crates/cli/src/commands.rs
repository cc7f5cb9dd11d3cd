//! Command implementations, independent of argument parsing and printing.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use dynamodel_core::{Config, IndexDescriptor, Item, Record, Schema, Value, WireFragment};
use serde::Serialize;

use crate::error::{CliError, Result};

/// Read a JSON document from a file, or from stdin when no path is given.
pub fn read_json(path: Option<&Path>) -> Result<serde_json::Value> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(serde_json::from_str(&contents)?)
}

/// Apply defaults to a record and encode it.
pub fn encode_record(schema: &Schema, input: serde_json::Value) -> Result<BTreeMap<String, WireFragment>> {
    let mut record = into_record(input)?;
    schema.apply_defaults(&mut record);
    let item = schema.to_item(&record)?;
    Ok(item.into_iter().collect())
}

/// Decode a wire item into a record.
pub fn decode_item(schema: &Schema, input: serde_json::Value) -> Result<BTreeMap<String, Value>> {
    let item: Item = serde_json::from_value(input)?;
    let record = schema.from_item(&item)?;
    Ok(record.into_iter().collect())
}

/// Indexes of a table, ready for output.
#[derive(Debug, Serialize)]
pub struct IndexReport {
    pub table: String,
    pub indexes: Vec<IndexEntry>,
}

#[derive(Debug, Serialize)]
pub struct IndexEntry {
    pub attribute: String,
    #[serde(flatten)]
    pub index: IndexDescriptor,
}

pub fn index_report(config: &Config, table: &str, schema: &Schema) -> IndexReport {
    IndexReport {
        table: config.table_name(table),
        indexes: schema
            .indexes()
            .map(|(attribute, index)| IndexEntry {
                attribute: attribute.to_string(),
                index: index.clone(),
            })
            .collect(),
    }
}

fn into_record(input: serde_json::Value) -> Result<Record> {
    match Value::from(input) {
        Value::Object(fields) => Ok(fields.into_iter().collect()),
        other => Err(CliError::InvalidInput(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamodel_core::{AttributeOptions, IndexSpec, Throughput, ValidationError};
    use serde_json::json;

    fn schema() -> Schema {
        let mut schema = Schema::with_throughput(Throughput::new(3, 4));
        schema
            .add_attribute(
                "email",
                "string",
                AttributeOptions::new()
                    .required()
                    .lowercase()
                    .with_index(IndexSpec::global()),
            )
            .unwrap();
        schema
            .add_attribute("visits", "number", AttributeOptions::new().with_default(0_i64))
            .unwrap();
        schema
    }

    #[test]
    fn test_encode_record_applies_defaults() {
        let item = encode_record(&schema(), json!({"email": "ADA@EXAMPLE.COM"})).unwrap();

        assert_eq!(item["email"], WireFragment::S("ada@example.com".to_string()));
        assert_eq!(item["visits"], WireFragment::N("0".to_string()));
    }

    #[test]
    fn test_encode_record_missing_required() {
        let result = encode_record(&schema(), json!({"visits": 2}));

        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::Required(ref name))) if name == "email"
        ));
    }

    #[test]
    fn test_encode_record_rejects_non_object() {
        let result = encode_record(&schema(), json!(["email"]));

        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_decode_item() {
        let record = decode_item(
            &schema(),
            json!({"email": {"S": "ada@example.com"}, "visits": {"N": "12"}}),
        )
        .unwrap();

        assert_eq!(record["email"], Value::from("ada@example.com"));
        assert_eq!(record["visits"], Value::from(12_i64));
    }

    #[test]
    fn test_decode_item_rejects_unknown_wire_key() {
        let result = decode_item(&schema(), json!({"email": {"M": {}}}));

        assert!(matches!(result, Err(CliError::Json(_))));
    }

    #[test]
    fn test_index_report() {
        let config = Config {
            table_throughput: Throughput::default(),
            table_prefix: "dev_".to_string(),
        };
        let report = index_report(&config, "users", &schema());

        assert_eq!(report.table, "dev_users");
        assert_eq!(report.indexes.len(), 1);
        assert_eq!(report.indexes[0].attribute, "email");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["indexes"][0]["name"], "emailGlobalIndex");
        assert_eq!(json["indexes"][0]["throughput"], json!({"read": 3, "write": 4}));
    }
}
