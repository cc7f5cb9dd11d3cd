//! Attribute options and the definitions they compile into.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::types::{resolve_type_spec, LogicalType, TypeCodec, TypeSpec};
use crate::error::Result;
use crate::index::{resolve_indexes, IndexDeclaration, IndexDescriptor, Throughput};
use crate::value::Value;
use crate::wire::WireClass;

/// A native-value rewrite applied on write (`set`) or read (`get`).
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type Provider = Arc<dyn Fn() -> Value + Send + Sync>;

/// Declared default: a literal value or a function producing one.
#[derive(Clone)]
pub enum DefaultOption {
    Value(Value),
    Provider(Provider),
}

impl DefaultOption {
    pub fn provider(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        DefaultOption::Provider(Arc::new(f))
    }
}

impl From<Value> for DefaultOption {
    fn from(value: Value) -> Self {
        DefaultOption::Value(value)
    }
}

impl From<&str> for DefaultOption {
    fn from(value: &str) -> Self {
        DefaultOption::Value(value.into())
    }
}

impl From<String> for DefaultOption {
    fn from(value: String) -> Self {
        DefaultOption::Value(value.into())
    }
}

impl From<bool> for DefaultOption {
    fn from(value: bool) -> Self {
        DefaultOption::Value(value.into())
    }
}

impl From<i64> for DefaultOption {
    fn from(value: i64) -> Self {
        DefaultOption::Value(value.into())
    }
}

/// Declared validation: a predicate, a pattern the text form must match, or a
/// literal the value must equal.
#[derive(Clone)]
pub enum ValidationRule {
    Predicate(Predicate),
    Pattern(Regex),
    Equals(Value),
}

impl ValidationRule {
    pub fn predicate(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        ValidationRule::Predicate(Arc::new(f))
    }
}

impl From<Regex> for ValidationRule {
    fn from(pattern: Regex) -> Self {
        ValidationRule::Pattern(pattern)
    }
}

impl From<Value> for ValidationRule {
    fn from(value: Value) -> Self {
        ValidationRule::Equals(value)
    }
}

/// A compiled validation predicate.
#[derive(Clone)]
pub struct Validator(Predicate);

impl Validator {
    fn compile(rule: ValidationRule) -> Self {
        match rule {
            ValidationRule::Predicate(f) => Validator(f),
            ValidationRule::Pattern(pattern) => {
                Validator(Arc::new(move |value| pattern.is_match(&value.as_text())))
            }
            ValidationRule::Equals(expected) => {
                Validator(Arc::new(move |value| equals_literal(value, &expected)))
            }
        }
    }

    pub fn check(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

/// Numbers compare by value, so `7` equals `7.0`.
fn equals_literal(value: &Value, expected: &Value) -> bool {
    match (value, expected) {
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            a.as_f64() == b.as_f64()
        }
        _ => value == expected,
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// A compiled default provider.
#[derive(Clone)]
pub struct DefaultProvider(Provider);

impl DefaultProvider {
    /// `None` for a `Null` literal, which clears the default.
    fn compile(option: DefaultOption) -> Option<Self> {
        match option {
            DefaultOption::Value(Value::Null) => None,
            DefaultOption::Value(value) => Some(DefaultProvider(Arc::new(move || value.clone()))),
            DefaultOption::Provider(f) => Some(DefaultProvider(f)),
        }
    }

    pub fn provide(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultProvider(..)")
    }
}

/// Text formatting applied to string-class wire values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub trim: bool,
    pub lowercase: bool,
    pub uppercase: bool,
}

impl FormatOptions {
    /// Trim, then lowercase, then uppercase.
    pub fn apply(&self, mut text: String) -> String {
        if self.trim {
            text = text.trim().to_string();
        }
        if self.lowercase {
            text = text.to_lowercase();
        }
        if self.uppercase {
            text = text.to_uppercase();
        }
        text
    }
}

/// Options accepted when defining an attribute.
#[derive(Clone, Default)]
pub struct AttributeOptions {
    pub default: Option<DefaultOption>,
    pub required: bool,
    pub validate: Option<ValidationRule>,
    pub set: Option<Transform>,
    pub get: Option<Transform>,
    pub format: FormatOptions,
    pub indexes: Vec<IndexDeclaration>,
}

impl AttributeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<DefaultOption>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_default_fn(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(DefaultOption::provider(f));
        self
    }

    pub fn with_validation(mut self, rule: impl Into<ValidationRule>) -> Self {
        self.validate = Some(rule.into());
        self
    }

    pub fn with_validator(mut self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validate = Some(ValidationRule::predicate(f));
        self
    }

    pub fn with_set(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.set = Some(Arc::new(f));
        self
    }

    pub fn with_get(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.get = Some(Arc::new(f));
        self
    }

    pub fn trim(mut self) -> Self {
        self.format.trim = true;
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.format.lowercase = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.format.uppercase = true;
        self
    }

    pub fn with_index(mut self, index: impl Into<IndexDeclaration>) -> Self {
        self.indexes.push(index.into());
        self
    }
}

/// One named, typed field of a schema.
///
/// Built once by [`AttributeDefinition::define`] and read-only afterwards. The
/// encode/decode paths live in the `codec` module.
#[derive(Clone)]
pub struct AttributeDefinition {
    pub(super) name: String,
    pub(super) codec: &'static TypeCodec,
    pub(super) is_set: bool,
    pub(super) required: bool,
    pub(super) default: Option<DefaultProvider>,
    pub(super) validator: Option<Validator>,
    pub(super) set: Option<Transform>,
    pub(super) get: Option<Transform>,
    pub(super) format: FormatOptions,
    pub(super) indexes: BTreeMap<String, IndexDescriptor>,
}

impl AttributeDefinition {
    /// Define an attribute.
    ///
    /// `table_throughput` is the owning schema's throughput, copied into global
    /// indexes that do not declare their own. Every configuration problem is
    /// reported here as a `SchemaError`.
    pub fn define(
        table_throughput: Throughput,
        name: impl Into<String>,
        type_spec: impl Into<TypeSpec>,
        options: AttributeOptions,
    ) -> Result<Self> {
        let name = name.into();
        let resolved = resolve_type_spec(&type_spec.into())?;
        let default = options.default.and_then(DefaultProvider::compile);
        let validator = options.validate.map(Validator::compile);
        let indexes = resolve_indexes(&name, &options.indexes, table_throughput)?;

        tracing::debug!(
            attribute = %name,
            r#type = %resolved.codec.logical,
            set = resolved.is_set,
            indexes = indexes.len(),
            "Defined attribute"
        );

        Ok(Self {
            name,
            codec: resolved.codec,
            is_set: resolved.is_set,
            required: options.required,
            default,
            validator,
            set: options.set,
            get: options.get,
            format: options.format,
            indexes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logical_type(&self) -> LogicalType {
        self.codec.logical
    }

    pub fn wire_class(&self) -> WireClass {
        self.codec.wire_class
    }

    pub fn is_set(&self) -> bool {
        self.is_set
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn format(&self) -> FormatOptions {
        self.format
    }

    /// Resolved indexes keyed by name.
    pub fn indexes(&self) -> &BTreeMap<String, IndexDescriptor> {
        &self.indexes
    }
}

impl fmt::Debug for AttributeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDefinition")
            .field("name", &self.name)
            .field("type", &self.codec.logical)
            .field("is_set", &self.is_set)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("validator", &self.validator)
            .field("format", &self.format)
            .field("indexes", &self.indexes)
            .finish_non_exhaustive()
    }
}
