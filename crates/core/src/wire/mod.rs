//! Typed-attribute wire representation.
//!
//! A `WireFragment` is one attribute value as the store sees it. Serialized with serde
//! it takes the store's JSON shape, e.g. `{"S": "x"}` or `{"NS": ["1", "2"]}`.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A wire item, keyed by attribute name.
pub type Item = HashMap<String, WireFragment>;

/// Storage class of a wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireClass {
    String,
    Number,
    Binary,
}

impl WireClass {
    /// Key used for a scalar of this class.
    pub const fn code(self) -> &'static str {
        match self {
            WireClass::String => "S",
            WireClass::Number => "N",
            WireClass::Binary => "B",
        }
    }

    /// Key used for a set of this class.
    pub const fn set_code(self) -> &'static str {
        match self {
            WireClass::String => "SS",
            WireClass::Number => "NS",
            WireClass::Binary => "BS",
        }
    }
}

impl fmt::Display for WireClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One attribute value in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireFragment {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "B", with = "base64_bytes")]
    B(Vec<u8>),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS", with = "base64_bytes_list")]
    Bs(Vec<Vec<u8>>),
}

impl WireFragment {
    /// The storage class of this fragment.
    pub const fn class(&self) -> WireClass {
        match self {
            WireFragment::S(_) | WireFragment::Ss(_) => WireClass::String,
            WireFragment::N(_) | WireFragment::Ns(_) => WireClass::Number,
            WireFragment::B(_) | WireFragment::Bs(_) => WireClass::Binary,
        }
    }

    /// Whether this fragment holds a set.
    pub const fn is_set(&self) -> bool {
        matches!(
            self,
            WireFragment::Ss(_) | WireFragment::Ns(_) | WireFragment::Bs(_)
        )
    }

    /// The wire key, e.g. `S` or `NS`.
    pub const fn key(&self) -> &'static str {
        if self.is_set() {
            self.class().set_code()
        } else {
            self.class().code()
        }
    }

    pub(crate) fn scalar(class: WireClass, value: WireScalar) -> Self {
        match class {
            WireClass::String => WireFragment::S(value.into_text()),
            WireClass::Number => WireFragment::N(value.into_text()),
            WireClass::Binary => WireFragment::B(value.into_bytes()),
        }
    }

    pub(crate) fn set(class: WireClass, values: Vec<WireScalar>) -> Self {
        match class {
            WireClass::String => WireFragment::Ss(values.into_iter().map(WireScalar::into_text).collect()),
            WireClass::Number => WireFragment::Ns(values.into_iter().map(WireScalar::into_text).collect()),
            WireClass::Binary => WireFragment::Bs(values.into_iter().map(WireScalar::into_bytes).collect()),
        }
    }

    /// Raw members stored under the given key, or `None` when the key does not match.
    pub(crate) fn members(&self, class: WireClass, set: bool) -> Option<Vec<WireRef<'_>>> {
        if self.class() != class || self.is_set() != set {
            return None;
        }
        let members = match self {
            WireFragment::S(s) | WireFragment::N(s) => vec![WireRef::Text(s)],
            WireFragment::B(b) => vec![WireRef::Bytes(b)],
            WireFragment::Ss(items) | WireFragment::Ns(items) => {
                items.iter().map(|s| WireRef::Text(s)).collect()
            }
            WireFragment::Bs(items) => items.iter().map(|b| WireRef::Bytes(b)).collect(),
        };
        Some(members)
    }
}

/// An owned scalar on its way to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WireScalar {
    Text(String),
    Bytes(Vec<u8>),
}

impl WireScalar {
    pub(crate) fn into_text(self) -> String {
        match self {
            WireScalar::Text(s) => s,
            WireScalar::Bytes(b) => String::from_utf8_lossy(&b).into_owned(),
        }
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        match self {
            WireScalar::Text(s) => s.into_bytes(),
            WireScalar::Bytes(b) => b,
        }
    }
}

/// A borrowed scalar read from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WireRef<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> WireRef<'a> {
    pub(crate) fn text(self) -> Cow<'a, str> {
        match self {
            WireRef::Text(s) => Cow::Borrowed(s),
            WireRef::Bytes(b) => String::from_utf8_lossy(b),
        }
    }

    pub(crate) fn bytes(self) -> &'a [u8] {
        match self {
            WireRef::Text(s) => s.as_bytes(),
            WireRef::Bytes(b) => b,
        }
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

mod base64_bytes_list {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded: Vec<String> = items.iter().map(|b| STANDARD.encode(b)).collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
