//! Pretty output formatting.

use std::collections::BTreeMap;

use dynamodel_core::{Value, WireFragment};

use crate::commands::IndexReport;

/// Format an encoded item, one attribute per line.
pub fn format_item(item: &BTreeMap<String, WireFragment>) -> String {
    if item.is_empty() {
        return "Empty item.".to_string();
    }
    let mut output = format!("ITEM ({})\n", item.len());
    output.push_str(&"-".repeat(40));
    for (name, fragment) in item {
        let body = serde_json::to_value(fragment)
            .ok()
            .and_then(|json| json.get(fragment.key()).cloned())
            .unwrap_or_default();
        output.push_str(&format!("\n  {} [{}] {}", name, fragment.key(), body));
    }
    output
}

/// Format a decoded record, one field per line.
pub fn format_record(record: &BTreeMap<String, Value>) -> String {
    if record.is_empty() {
        return "Empty record.".to_string();
    }
    let mut output = format!("RECORD ({})\n", record.len());
    output.push_str(&"-".repeat(40));
    for (name, value) in record {
        output.push_str(&format!("\n  {}: {}", name, value));
    }
    output
}

/// Format the indexes of a table.
pub fn format_indexes(report: &IndexReport) -> String {
    if report.indexes.is_empty() {
        return format!("No indexes on {}.", report.table);
    }
    let mut output = format!("INDEXES ON {} ({})\n", report.table, report.indexes.len());
    output.push_str(&"-".repeat(40));
    for entry in &report.indexes {
        let index = &entry.index;
        let scope = if index.global { "global" } else { "local" };
        output.push_str(&format!(
            "\n{} ({}) on {}",
            index.name, scope, entry.attribute
        ));
        if let Some(range_key) = &index.range_key {
            output.push_str(&format!("\n  Range key: {}", range_key));
        }
        if let Some(throughput) = index.throughput {
            output.push_str(&format!(
                "\n  Throughput: {} read, {} write",
                throughput.read, throughput.write
            ));
        }
        output.push('\n');
    }
    output
}
