//! Logical attribute types and their wire codecs.
//!
//! Every `LogicalType` owns exactly one static `TypeCodec`. The table is resolved
//! once when an attribute is defined and carried by reference afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde_json::Number;

use crate::error::{Result, SchemaError};
use crate::value::{format_timestamp, parse_timestamp, Value};
use crate::wire::{WireClass, WireRef, WireScalar};

/// Application-level type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Text = 0,
    Number = 1,
    Boolean = 2,
    Timestamp = 3,
    Object = 4,
    List = 5,
    Binary = 6,
}

impl LogicalType {
    pub const ALL: [LogicalType; 7] = [
        LogicalType::Text,
        LogicalType::Number,
        LogicalType::Boolean,
        LogicalType::Timestamp,
        LogicalType::Object,
        LogicalType::List,
        LogicalType::Binary,
    ];

    /// The codec record for this type.
    pub fn codec(self) -> &'static TypeCodec {
        &TYPE_CODECS[self as usize]
    }

    /// The wire storage class for this type.
    pub fn wire_class(self) -> WireClass {
        self.codec().wire_class
    }

    pub const fn name(self) -> &'static str {
        match self {
            LogicalType::Text => "text",
            LogicalType::Number => "number",
            LogicalType::Boolean => "boolean",
            LogicalType::Timestamp => "timestamp",
            LogicalType::Object => "object",
            LogicalType::List => "list",
            LogicalType::Binary => "binary",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicalType {
    type Err = SchemaError;

    /// Case-insensitive. Accepts the store-facing aliases (`string`, `date`, `array`, `buffer`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "string" => Ok(LogicalType::Text),
            "number" => Ok(LogicalType::Number),
            "boolean" => Ok(LogicalType::Boolean),
            "timestamp" | "date" => Ok(LogicalType::Timestamp),
            "object" => Ok(LogicalType::Object),
            "list" | "array" => Ok(LogicalType::List),
            "binary" | "buffer" => Ok(LogicalType::Binary),
            _ => Err(SchemaError::InvalidType(s.to_string())),
        }
    }
}

/// Wire conversion record for one logical type.
pub struct TypeCodec {
    pub logical: LogicalType,
    pub wire_class: WireClass,
    wireify: fn(&Value) -> Option<WireScalar>,
    dewireify: fn(WireRef<'_>) -> std::result::Result<Value, String>,
}

impl fmt::Debug for TypeCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCodec")
            .field("logical", &self.logical)
            .field("wire_class", &self.wire_class)
            .finish_non_exhaustive()
    }
}

impl TypeCodec {
    /// Native scalar to wire scalar. `None` when the value cannot be represented.
    pub(crate) fn wireify(&self, value: &Value) -> Option<WireScalar> {
        (self.wireify)(value)
    }

    /// Wire scalar back to a native scalar.
    pub(crate) fn dewireify(&self, raw: WireRef<'_>) -> std::result::Result<Value, String> {
        (self.dewireify)(raw)
    }
}

static TYPE_CODECS: [TypeCodec; 7] = [
    TypeCodec {
        logical: LogicalType::Text,
        wire_class: WireClass::String,
        wireify: wireify_text,
        dewireify: dewireify_text,
    },
    TypeCodec {
        logical: LogicalType::Number,
        wire_class: WireClass::Number,
        wireify: wireify_number,
        dewireify: dewireify_number,
    },
    TypeCodec {
        logical: LogicalType::Boolean,
        wire_class: WireClass::Number,
        wireify: wireify_boolean,
        dewireify: dewireify_boolean,
    },
    TypeCodec {
        logical: LogicalType::Timestamp,
        wire_class: WireClass::String,
        wireify: wireify_timestamp,
        dewireify: dewireify_timestamp,
    },
    TypeCodec {
        logical: LogicalType::Object,
        wire_class: WireClass::String,
        wireify: wireify_json,
        dewireify: dewireify_json,
    },
    TypeCodec {
        logical: LogicalType::List,
        wire_class: WireClass::String,
        wireify: wireify_json,
        dewireify: dewireify_json,
    },
    TypeCodec {
        logical: LogicalType::Binary,
        wire_class: WireClass::Binary,
        wireify: wireify_binary,
        dewireify: dewireify_binary,
    },
];

fn wireify_text(value: &Value) -> Option<WireScalar> {
    match value {
        Value::Null => None,
        other => Some(WireScalar::Text(other.as_text())),
    }
}

fn wireify_number(value: &Value) -> Option<WireScalar> {
    let number = match value {
        Value::Number(n) => n.clone(),
        Value::Bool(b) => Number::from(u8::from(*b)),
        Value::String(s) => serde_json::from_str::<Number>(s.trim()).ok()?,
        _ => return None,
    };
    Some(WireScalar::Text(number.to_string()))
}

fn wireify_boolean(value: &Value) -> Option<WireScalar> {
    let bit = if value.is_truthy() { "1" } else { "0" };
    Some(WireScalar::Text(bit.to_string()))
}

fn wireify_timestamp(value: &Value) -> Option<WireScalar> {
    let dt = match value {
        Value::Timestamp(dt) => *dt,
        Value::Number(n) => chrono::DateTime::<chrono::Utc>::from_timestamp_millis(n.as_i64()?)?,
        Value::String(s) => parse_timestamp(s)?,
        _ => return None,
    };
    // RFC 3339 only has four-digit years.
    if !(0..=9999).contains(&dt.year()) {
        return None;
    }
    Some(WireScalar::Text(format_timestamp(&dt)))
}

fn wireify_json(value: &Value) -> Option<WireScalar> {
    match value {
        Value::Null => None,
        other => Some(WireScalar::Text(other.to_json().to_string())),
    }
}

fn wireify_binary(value: &Value) -> Option<WireScalar> {
    match value {
        Value::Binary(bytes) => Some(WireScalar::Bytes(bytes.clone())),
        Value::String(s) => Some(WireScalar::Bytes(s.as_bytes().to_vec())),
        _ => None,
    }
}

fn dewireify_text(raw: WireRef<'_>) -> std::result::Result<Value, String> {
    Ok(Value::String(raw.text().into_owned()))
}

fn dewireify_number(raw: WireRef<'_>) -> std::result::Result<Value, String> {
    serde_json::from_str::<Number>(raw.text().trim())
        .map(Value::Number)
        .map_err(|e| e.to_string())
}

fn dewireify_boolean(raw: WireRef<'_>) -> std::result::Result<Value, String> {
    serde_json::from_str::<Number>(raw.text().trim())
        .map(|n| Value::Bool(n.as_f64().is_some_and(|n| n != 0.0)))
        .map_err(|e| e.to_string())
}

fn dewireify_timestamp(raw: WireRef<'_>) -> std::result::Result<Value, String> {
    parse_timestamp(&raw.text())
        .map(Value::Timestamp)
        .ok_or_else(|| "expected epoch milliseconds or an RFC 3339 timestamp".to_string())
}

fn dewireify_json(raw: WireRef<'_>) -> std::result::Result<Value, String> {
    serde_json::from_str::<serde_json::Value>(&raw.text())
        .map(Value::from)
        .map_err(|e| e.to_string())
}

fn dewireify_binary(raw: WireRef<'_>) -> std::result::Result<Value, String> {
    Ok(Value::Binary(raw.bytes().to_vec()))
}

/// How an attribute's type is declared at schema-definition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// A single value of the type.
    Scalar(LogicalType),
    /// A set of values of exactly one type.
    SetOf(LogicalType),
    /// A type given by name, resolved through the registry.
    Named { name: String, set: bool },
}

impl TypeSpec {
    pub fn named(name: impl Into<String>) -> Self {
        TypeSpec::Named {
            name: name.into(),
            set: false,
        }
    }

    pub fn named_set(name: impl Into<String>) -> Self {
        TypeSpec::Named {
            name: name.into(),
            set: true,
        }
    }
}

impl From<LogicalType> for TypeSpec {
    fn from(logical: LogicalType) -> Self {
        TypeSpec::Scalar(logical)
    }
}

impl From<&str> for TypeSpec {
    fn from(name: &str) -> Self {
        TypeSpec::named(name)
    }
}

impl From<String> for TypeSpec {
    fn from(name: String) -> Self {
        TypeSpec::named(name)
    }
}

/// A type spec after registry lookup.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedType {
    pub codec: &'static TypeCodec,
    pub is_set: bool,
}

/// Resolve a type spec against the registry.
pub fn resolve_type_spec(spec: &TypeSpec) -> Result<ResolvedType> {
    let (logical, is_set) = match spec {
        TypeSpec::Scalar(logical) => (*logical, false),
        TypeSpec::SetOf(logical) => (*logical, true),
        TypeSpec::Named { name, set } => (name.parse::<LogicalType>()?, *set),
    };
    Ok(ResolvedType {
        codec: logical.codec(),
        is_set,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_codec_table_matches_types() {
        for logical in LogicalType::ALL {
            assert_eq!(logical.codec().logical, logical);
        }
    }

    #[test]
    fn test_wire_classes() {
        assert_eq!(LogicalType::Text.wire_class(), WireClass::String);
        assert_eq!(LogicalType::Number.wire_class(), WireClass::Number);
        assert_eq!(LogicalType::Boolean.wire_class(), WireClass::Number);
        assert_eq!(LogicalType::Timestamp.wire_class(), WireClass::String);
        assert_eq!(LogicalType::Object.wire_class(), WireClass::String);
        assert_eq!(LogicalType::List.wire_class(), WireClass::String);
        assert_eq!(LogicalType::Binary.wire_class(), WireClass::Binary);
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!("String".parse::<LogicalType>().unwrap(), LogicalType::Text);
        assert_eq!("NUMBER".parse::<LogicalType>().unwrap(), LogicalType::Number);
        assert_eq!("Date".parse::<LogicalType>().unwrap(), LogicalType::Timestamp);
        assert_eq!("array".parse::<LogicalType>().unwrap(), LogicalType::List);
        assert_eq!("Buffer".parse::<LogicalType>().unwrap(), LogicalType::Binary);
        assert_eq!("boolean".parse::<LogicalType>().unwrap(), LogicalType::Boolean);
    }

    #[test]
    fn test_unknown_name_is_schema_error() {
        assert_eq!(
            "uuid".parse::<LogicalType>(),
            Err(SchemaError::InvalidType("uuid".to_string()))
        );
        assert!("".parse::<LogicalType>().is_err());
    }

    #[test]
    fn test_resolve_set_spec() {
        let resolved = resolve_type_spec(&TypeSpec::SetOf(LogicalType::Number)).unwrap();
        assert!(resolved.is_set);
        assert_eq!(resolved.codec.logical, LogicalType::Number);

        let resolved = resolve_type_spec(&TypeSpec::named_set("string")).unwrap();
        assert!(resolved.is_set);
        assert_eq!(resolved.codec.logical, LogicalType::Text);

        let resolved = resolve_type_spec(&"object".into()).unwrap();
        assert!(!resolved.is_set);
    }

    #[test]
    fn test_resolve_invalid_name() {
        assert!(resolve_type_spec(&TypeSpec::named("money")).is_err());
    }

    #[test]
    fn test_number_wireify() {
        let codec = LogicalType::Number.codec();
        assert_eq!(
            codec.wireify(&Value::from(2.5)),
            Some(WireScalar::Text("2.5".to_string()))
        );
        assert_eq!(
            codec.wireify(&Value::from(" 7 ")),
            Some(WireScalar::Text("7".to_string()))
        );
        assert_eq!(codec.wireify(&Value::from("seven")), None);
        assert_eq!(codec.wireify(&Value::List(vec![])), None);
    }

    #[test]
    fn test_boolean_wireify_uses_truthiness() {
        let codec = LogicalType::Boolean.codec();
        assert_eq!(
            codec.wireify(&Value::Bool(true)),
            Some(WireScalar::Text("1".to_string()))
        );
        assert_eq!(
            codec.wireify(&Value::from(0_i64)),
            Some(WireScalar::Text("0".to_string()))
        );
        assert_eq!(
            codec.wireify(&Value::from("yes")),
            Some(WireScalar::Text("1".to_string()))
        );
    }

    #[test]
    fn test_timestamp_wireify_accepts_millis_and_strings() {
        let codec = LogicalType::Timestamp.codec();
        let expected = Some(WireScalar::Text("2024-06-15T22:30:05.000Z".to_string()));
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 22, 30, 5).unwrap();

        assert_eq!(codec.wireify(&Value::Timestamp(dt)), expected);
        assert_eq!(codec.wireify(&Value::from(dt.timestamp_millis())), expected);
        assert_eq!(
            codec.wireify(&Value::from("2024-06-15T22:30:05+00:00")),
            expected
        );
        assert_eq!(codec.wireify(&Value::Bool(true)), None);
    }

    #[test]
    fn test_json_wireify() {
        let codec = LogicalType::Object.codec();
        assert_eq!(
            codec.wireify(&Value::from(json!({"a": 1}))),
            Some(WireScalar::Text(r#"{"a":1}"#.to_string()))
        );
    }

    #[test]
    fn test_dewireify_boolean() {
        let codec = LogicalType::Boolean.codec();
        assert_eq!(codec.dewireify(WireRef::Text("1")), Ok(Value::Bool(true)));
        assert_eq!(codec.dewireify(WireRef::Text("0")), Ok(Value::Bool(false)));
        assert_eq!(codec.dewireify(WireRef::Text("-3")), Ok(Value::Bool(true)));
        assert!(codec.dewireify(WireRef::Text("maybe")).is_err());
    }

    #[test]
    fn test_dewireify_number_rejects_garbage() {
        let codec = LogicalType::Number.codec();
        assert_eq!(
            codec.dewireify(WireRef::Text("42")),
            Ok(Value::from(42_i64))
        );
        assert!(codec.dewireify(WireRef::Text("4 2")).is_err());
    }

    #[test]
    fn test_dewireify_binary() {
        let codec = LogicalType::Binary.codec();
        assert_eq!(
            codec.dewireify(WireRef::Bytes(&[0, 255])),
            Ok(Value::Binary(vec![0, 255]))
        );
    }
}
