//! Conversions between wire fragments and `aws-sdk-dynamodb` attribute values.
//!
//! Pure functions; no DynamoDB access is needed to use or test them.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;

use super::{Item, WireFragment};
use crate::error::DecodeError;

impl From<WireFragment> for AttributeValue {
    fn from(fragment: WireFragment) -> Self {
        match fragment {
            WireFragment::S(s) => AttributeValue::S(s),
            WireFragment::N(n) => AttributeValue::N(n),
            WireFragment::B(b) => AttributeValue::B(Blob::new(b)),
            WireFragment::Ss(items) => AttributeValue::Ss(items),
            WireFragment::Ns(items) => AttributeValue::Ns(items),
            WireFragment::Bs(items) => AttributeValue::Bs(items.into_iter().map(Blob::new).collect()),
        }
    }
}

impl TryFrom<&AttributeValue> for WireFragment {
    type Error = DecodeError;

    fn try_from(value: &AttributeValue) -> Result<Self, Self::Error> {
        match value {
            AttributeValue::S(s) => Ok(WireFragment::S(s.clone())),
            AttributeValue::N(n) => Ok(WireFragment::N(n.clone())),
            AttributeValue::B(b) => Ok(WireFragment::B(b.as_ref().to_vec())),
            AttributeValue::Ss(items) => Ok(WireFragment::Ss(items.clone())),
            AttributeValue::Ns(items) => Ok(WireFragment::Ns(items.clone())),
            AttributeValue::Bs(items) => Ok(WireFragment::Bs(
                items.iter().map(|b| b.as_ref().to_vec()).collect(),
            )),
            other => Err(DecodeError::UnsupportedAttributeValue(format!("{:?}", other))),
        }
    }
}

/// Convert a wire item to a DynamoDB item.
pub fn item_to_attribute_map(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter().map(|(k, v)| (k, v.into())).collect()
}

/// Convert a DynamoDB item to a wire item.
pub fn attribute_map_to_item(
    item: &HashMap<String, AttributeValue>,
) -> Result<Item, DecodeError> {
    item.iter()
        .map(|(k, v)| Ok((k.clone(), WireFragment::try_from(v)?)))
        .collect()
}
