//! A table's attribute set and record-level conversions.

use crate::attribute::{AttributeDefinition, AttributeOptions, TypeSpec};
use crate::config::Config;
use crate::error::{DecodeError, Result, SchemaError, ValidationError};
use crate::index::{IndexDescriptor, Throughput};
use crate::value::Record;
use crate::wire::Item;

/// Attribute definitions for one table.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    throughput: Throughput,
    attributes: Vec<AttributeDefinition>,
}

impl Schema {
    /// An empty schema with the minimum table throughput (1 read, 1 write).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_throughput(throughput: Throughput) -> Self {
        Self {
            throughput,
            attributes: Vec::new(),
        }
    }

    /// An empty schema using the configured default table throughput.
    pub fn from_config(config: &Config) -> Self {
        Self::with_throughput(config.table_throughput())
    }

    pub fn throughput(&self) -> Throughput {
        self.throughput
    }

    /// Change the table throughput. Indexes resolved before the change keep the old value.
    pub fn set_throughput(&mut self, throughput: Throughput) {
        self.throughput = throughput;
    }

    /// Define an attribute and add it to the schema.
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        type_spec: impl Into<TypeSpec>,
        options: AttributeOptions,
    ) -> Result<&AttributeDefinition> {
        let name = name.into();
        if self.attribute(&name).is_some() {
            return Err(SchemaError::DuplicateAttribute(name));
        }

        let definition = AttributeDefinition::define(self.throughput, name, type_spec, options)?;
        if let Some(duplicate) = definition
            .indexes()
            .keys()
            .find(|index| self.index(index).is_some())
        {
            return Err(SchemaError::DuplicateIndex(duplicate.clone()));
        }

        self.attributes.push(definition);
        Ok(&self.attributes[self.attributes.len() - 1])
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    /// Attributes in definition order.
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Every resolved index with the name of the attribute that declares it.
    pub fn indexes(&self) -> impl Iterator<Item = (&str, &IndexDescriptor)> {
        self.attributes.iter().flat_map(|attr| {
            attr.indexes()
                .values()
                .map(move |index| (attr.name(), index))
        })
    }

    pub fn index(&self, name: &str) -> Option<&IndexDescriptor> {
        self.indexes()
            .find(|(_, index)| index.name == name)
            .map(|(_, index)| index)
    }

    /// Apply every attribute's default to the record, in definition order.
    pub fn apply_defaults(&self, record: &mut Record) {
        for attr in &self.attributes {
            attr.apply_default(record);
        }
    }

    /// Encode a record into a wire item.
    ///
    /// Attributes that encode to nothing are omitted and fields the schema does not
    /// know are ignored. Defaults are not applied; call [`Schema::apply_defaults`] first.
    pub fn to_item(&self, record: &Record) -> std::result::Result<Item, ValidationError> {
        let mut item = Item::new();
        for attr in &self.attributes {
            let value = record.get(attr.name()).cloned().unwrap_or_default();
            if let Some(fragment) = attr.encode(&value)? {
                item.insert(attr.name().to_string(), fragment);
            }
        }
        Ok(item)
    }

    /// Decode a wire item into a record. Attributes missing from the item are left out.
    pub fn from_item(&self, item: &Item) -> std::result::Result<Record, DecodeError> {
        let mut record = Record::new();
        for attr in &self.attributes {
            let Some(fragment) = item.get(attr.name()) else {
                continue;
            };
            if let Some(value) = attr.decode(fragment)? {
                record.insert(attr.name().to_string(), value);
            }
        }
        Ok(record)
    }
}
