//! Pure functions for resolving raw index declarations into descriptors.

use std::collections::BTreeMap;

use super::types::{IndexDeclaration, IndexDescriptor, IndexSpec, Throughput, ThroughputSpec};
use crate::error::{Result, SchemaError};

const GLOBAL_SUFFIX: &str = "GlobalIndex";
const LOCAL_SUFFIX: &str = "LocalIndex";

/// Resolve every declaration on an attribute, keyed by index name.
///
/// Global indexes without explicit throughput copy `table_throughput` as it is now.
pub fn resolve_indexes(
    attribute: &str,
    declarations: &[IndexDeclaration],
    table_throughput: Throughput,
) -> Result<BTreeMap<String, IndexDescriptor>> {
    let mut indexes = BTreeMap::new();

    for declaration in declarations {
        let descriptor = resolve_index(attribute, declaration, table_throughput)?;
        if indexes.contains_key(&descriptor.name) {
            return Err(SchemaError::DuplicateIndex(descriptor.name));
        }
        tracing::debug!(
            attribute,
            index = %descriptor.name,
            global = descriptor.global,
            "Resolved index"
        );
        indexes.insert(descriptor.name.clone(), descriptor);
    }

    Ok(indexes)
}

/// Resolve a single declaration.
pub fn resolve_index(
    attribute: &str,
    declaration: &IndexDeclaration,
    table_throughput: Throughput,
) -> Result<IndexDescriptor> {
    let default_spec = IndexSpec::default();
    let spec = match declaration {
        IndexDeclaration::Default => &default_spec,
        IndexDeclaration::Spec(spec) => spec,
    };

    let name = match spec.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => derived_name(attribute, spec.global),
    };
    if !is_valid_index_name(&name) {
        return Err(SchemaError::InvalidIndexName {
            attribute: attribute.to_string(),
            name,
        });
    }

    let (range_key, throughput) = if spec.global {
        let throughput = match &spec.throughput {
            Some(declared) => resolve_throughput(&name, declared)?,
            None => table_throughput,
        };
        (spec.range_key.clone(), Some(throughput))
    } else {
        if spec.range_key.is_some() || spec.throughput.is_some() {
            tracing::warn!(
                attribute,
                index = %name,
                "Ignoring rangeKey/throughput on a local index"
            );
        }
        (None, None)
    };

    Ok(IndexDescriptor {
        name,
        global: spec.global,
        range_key,
        projection: spec.project.clone().unwrap_or_default(),
        throughput,
    })
}

/// Validate declared throughput. Both read and write must be present and at least 1.
pub fn resolve_throughput(index: &str, declared: &ThroughputSpec) -> Result<Throughput> {
    let (read, write) = match *declared {
        ThroughputSpec::Uniform(value) => (Some(value), Some(value)),
        ThroughputSpec::Pair { read, write } => (read, write),
    };
    match (read, write) {
        (Some(read), Some(write)) if read >= 1 && write >= 1 => Ok(Throughput::new(read, write)),
        _ => Err(SchemaError::InvalidThroughput {
            index: index.to_string(),
            read,
            write,
        }),
    }
}

fn derived_name(attribute: &str, global: bool) -> String {
    let suffix = if global { GLOBAL_SUFFIX } else { LOCAL_SUFFIX };
    format!("{attribute}{suffix}")
}

/// Store rule for index names: 3-255 characters from `[A-Za-z0-9_.-]`.
fn is_valid_index_name(name: &str) -> bool {
    (3..=255).contains(&name.len())
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}
