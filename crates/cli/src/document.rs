//! JSON schema documents.
//!
//! ```json
//! {
//!   "table": "users",
//!   "throughput": {"read": 5, "write": 5},
//!   "attributes": [
//!     {"name": "email", "type": "string", "required": true, "trim": true,
//!      "validate": {"pattern": "^.+@.+$"}, "index": {"global": true}},
//!     {"name": "tags", "type": "string", "set": true}
//!   ]
//! }
//! ```

use std::path::Path;

use dynamodel_core::attribute::DefaultOption;
use dynamodel_core::index::{resolve_throughput, IndexOption, ThroughputSpec};
use dynamodel_core::{AttributeOptions, Config, Schema, TypeSpec, ValidationRule, Value};
use regex::Regex;
use serde::Deserialize;

use crate::error::Result;

/// A table schema as written in a JSON file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    pub table: String,
    #[serde(default)]
    pub throughput: Option<ThroughputSpec>,
    pub attributes: Vec<AttributeDocument>,
}

/// One attribute entry of a schema document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub set: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub validate: Option<ValidateDocument>,
    #[serde(default)]
    pub trim: bool,
    #[serde(default)]
    pub lowercase: bool,
    #[serde(default)]
    pub uppercase: bool,
    #[serde(default)]
    pub index: Option<IndexOption>,
}

/// Validation rules expressible in JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateDocument {
    Pattern(String),
    Equals(serde_json::Value),
}

impl SchemaDocument {
    /// Read and parse a schema document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Build the schema. The configured table throughput applies when the document has none.
    pub fn into_schema(self, config: &Config) -> Result<Schema> {
        let throughput = match &self.throughput {
            Some(declared) => resolve_throughput(&self.table, declared)?,
            None => config.table_throughput(),
        };

        let mut schema = Schema::with_throughput(throughput);
        for attribute in self.attributes {
            let type_spec = TypeSpec::Named {
                name: attribute.type_name.clone(),
                set: attribute.set,
            };
            let name = attribute.name.clone();
            let options = attribute.into_options()?;
            schema.add_attribute(name, type_spec, options)?;
        }

        tracing::debug!(
            table = %self.table,
            attributes = schema.attributes().len(),
            "Loaded schema"
        );
        Ok(schema)
    }
}

impl AttributeDocument {
    fn into_options(self) -> Result<AttributeOptions> {
        let mut options = AttributeOptions::new();
        options.required = self.required;
        options.format.trim = self.trim;
        options.format.lowercase = self.lowercase;
        options.format.uppercase = self.uppercase;

        if let Some(default) = self.default {
            options.default = Some(DefaultOption::Value(Value::from(default)));
        }
        options.validate = match self.validate {
            Some(ValidateDocument::Pattern(pattern)) => {
                Some(ValidationRule::Pattern(Regex::new(&pattern)?))
            }
            Some(ValidateDocument::Equals(value)) => Some(ValidationRule::Equals(value.into())),
            None => None,
        };
        if let Some(index) = self.index {
            options.indexes = index.into_declarations();
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use dynamodel_core::{LogicalType, SchemaError, Throughput};
    use serde_json::json;

    fn config() -> Config {
        Config {
            table_throughput: Throughput::new(2, 2),
            table_prefix: String::new(),
        }
    }

    fn parse(json: serde_json::Value) -> SchemaDocument {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_document_into_schema() {
        let document = parse(json!({
            "table": "users",
            "attributes": [
                {"name": "email", "type": "String", "required": true, "trim": true,
                 "index": [{"global": true, "throughput": 4}, true]},
                {"name": "tags", "type": "string", "set": true},
                {"name": "active", "type": "boolean", "default": true}
            ]
        }));
        let schema = document.into_schema(&config()).unwrap();

        assert_eq!(schema.throughput(), Throughput::new(2, 2));
        let email = schema.attribute("email").unwrap();
        assert!(email.is_required());
        assert!(email.format().trim);
        assert_eq!(
            email.indexes()["emailGlobalIndex"].throughput,
            Some(Throughput::new(4, 4))
        );
        assert!(email.indexes().contains_key("emailLocalIndex"));

        let tags = schema.attribute("tags").unwrap();
        assert!(tags.is_set());
        assert_eq!(tags.logical_type(), LogicalType::Text);

        assert!(schema.attribute("active").unwrap().has_default());
    }

    #[test]
    fn test_document_throughput_overrides_config() {
        let document = parse(json!({
            "table": "users",
            "throughput": {"read": 10, "write": 20},
            "attributes": []
        }));
        let schema = document.into_schema(&config()).unwrap();

        assert_eq!(schema.throughput(), Throughput::new(10, 20));
    }

    #[test]
    fn test_document_partial_throughput_is_rejected() {
        let document = parse(json!({
            "table": "users",
            "throughput": {"read": 10},
            "attributes": []
        }));
        let result = document.into_schema(&config());

        assert!(matches!(
            result,
            Err(CliError::Schema(SchemaError::InvalidThroughput { .. }))
        ));
    }

    #[test]
    fn test_document_partial_index_throughput_is_rejected() {
        let document = parse(json!({
            "table": "users",
            "attributes": [
                {"name": "email", "type": "string",
                 "index": {"global": true, "throughput": {"read": 5}}}
            ]
        }));

        assert!(matches!(
            document.into_schema(&config()),
            Err(CliError::Schema(SchemaError::InvalidThroughput { ref index, read: Some(5), write: None }))
                if index == "emailGlobalIndex"
        ));
    }

    #[test]
    fn test_document_malformed_index_throughput_is_rejected() {
        for throughput in [json!(-1), json!(2.5), json!("five"), json!({"read": 5, "write": "x"})] {
            let result = serde_json::from_value::<SchemaDocument>(json!({
                "table": "users",
                "attributes": [
                    {"name": "email", "type": "string",
                     "index": {"global": true, "throughput": throughput.clone()}}
                ]
            }));

            assert!(result.is_err(), "throughput {throughput} was accepted");
        }
    }

    #[test]
    fn test_document_load_reports_malformed_index() {
        let path = std::env::temp_dir().join(format!(
            "dynamodel-malformed-index-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"table": "users", "attributes": [
                {"name": "email", "type": "string", "index": {"global": true, "throughput": 2.5}}
            ]}"#,
        )
        .unwrap();

        let result = SchemaDocument::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(CliError::Json(_))));
    }

    #[test]
    fn test_document_pattern_validation() {
        let document = parse(json!({
            "table": "users",
            "attributes": [
                {"name": "code", "type": "string", "validate": {"pattern": "^[A-Z]{3}$"}}
            ]
        }));
        let schema = document.into_schema(&config()).unwrap();
        let code = schema.attribute("code").unwrap();

        assert!(code.encode(&Value::from("ABC")).is_ok());
        assert!(code.encode(&Value::from("abcd")).is_err());
    }

    #[test]
    fn test_document_invalid_pattern() {
        let document = parse(json!({
            "table": "users",
            "attributes": [
                {"name": "code", "type": "string", "validate": {"pattern": "(["}}
            ]
        }));

        assert!(matches!(
            document.into_schema(&config()),
            Err(CliError::Pattern(_))
        ));
    }

    #[test]
    fn test_document_unknown_type() {
        let document = parse(json!({
            "table": "users",
            "attributes": [{"name": "id", "type": "uuid"}]
        }));

        assert!(matches!(
            document.into_schema(&config()),
            Err(CliError::Schema(SchemaError::InvalidType(_)))
        ));
    }

    #[test]
    fn test_document_rejects_unknown_fields() {
        let result: std::result::Result<SchemaDocument, _> = serde_json::from_value(json!({
            "table": "users",
            "attributes": [{"name": "id", "type": "string", "unique": true}]
        }));

        assert!(result.is_err());
    }
}
