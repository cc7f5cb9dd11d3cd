//! Output formatting for command results.

pub mod pretty;

use serde::Serialize;

/// Compact JSON for scripts. A value that cannot be serialized prints as an empty line.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use dynamodel_core::WireFragment;

    #[test]
    fn test_format_json_item() {
        let mut item = BTreeMap::new();
        item.insert("age".to_string(), WireFragment::N("36".to_string()));
        item.insert(
            "tags".to_string(),
            WireFragment::Ns(vec!["1".to_string(), "2".to_string()]),
        );

        assert_eq!(
            format_json(&item),
            r#"{"age":{"N":"36"},"tags":{"NS":["1","2"]}}"#
        );
    }
}
