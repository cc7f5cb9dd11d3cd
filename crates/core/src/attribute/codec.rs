//! Encode/decode paths for a defined attribute.
//!
//! Pure functions of the definition and the input value. The only mutation is the
//! explicit `apply_default` on a caller-owned record.

use std::borrow::Cow;

use super::definition::AttributeDefinition;
use crate::error::{DecodeError, ValidationError};
use crate::value::{Record, Value};
use crate::wire::{WireClass, WireFragment, WireRef, WireScalar};

impl AttributeDefinition {
    /// Fill the field from the default provider when it is missing, null or empty.
    ///
    /// Mutates `record` in place. Calling it again once a value is present is a no-op.
    pub fn apply_default(&self, record: &mut Record) {
        let Some(provider) = &self.default else {
            return;
        };
        if record.get(&self.name).is_none_or(Value::is_absent) {
            let value = provider.provide();
            tracing::debug!(attribute = %self.name, %value, "Defaulted attribute");
            record.insert(self.name.clone(), value);
        }
    }

    /// Encode a native value. `Ok(None)` means the attribute is omitted from the item.
    pub fn encode(&self, value: &Value) -> Result<Option<WireFragment>, ValidationError> {
        self.encode_with(value, false)
    }

    /// Encode a native value. With `suppress_set`, a set attribute encodes `value`
    /// as a single scalar of its element type (e.g. for key conditions).
    pub fn encode_with(
        &self,
        value: &Value,
        suppress_set: bool,
    ) -> Result<Option<WireFragment>, ValidationError> {
        if value.is_absent() {
            if self.required {
                return Err(ValidationError::Required(self.name.clone()));
            }
            return Ok(None);
        }

        let as_set = self.is_set && !suppress_set;
        if as_set {
            match value.as_list() {
                None => return Err(ValidationError::NotASequence(self.name.clone())),
                Some([]) => return Ok(None),
                Some(_) => {}
            }
        }

        if let Some(validator) = &self.validator {
            if !validator.check(value) {
                return Err(ValidationError::Failed(self.name.clone()));
            }
        }

        let value = match &self.set {
            Some(transform) => Cow::Owned(transform(value.clone())),
            None => Cow::Borrowed(value),
        };

        if !as_set {
            let scalar = self.wire_scalar(&value)?;
            return Ok(Some(WireFragment::scalar(self.codec.wire_class, scalar)));
        }

        let items = value
            .as_list()
            .ok_or_else(|| ValidationError::NotASequence(self.name.clone()))?;
        let mut members: Vec<WireScalar> = Vec::with_capacity(items.len());
        for item in items {
            let member = self.wire_scalar(item)?;
            // Store sets reject duplicate members.
            if !members.contains(&member) {
                members.push(member);
            }
        }
        if members.is_empty() {
            return Ok(None);
        }
        Ok(Some(WireFragment::set(self.codec.wire_class, members)))
    }

    /// Decode a wire fragment. `Ok(None)` when the fragment is not stored under this
    /// attribute's key.
    pub fn decode(&self, fragment: &WireFragment) -> Result<Option<Value>, DecodeError> {
        let Some(members) = fragment.members(self.codec.wire_class, self.is_set) else {
            return Ok(None);
        };

        let values = members
            .into_iter()
            .map(|raw| self.dewire_scalar(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let value = if self.is_set {
            Value::List(values)
        } else {
            values.into_iter().next().unwrap_or_default()
        };

        Ok(Some(match &self.get {
            Some(transform) => transform(value),
            None => value,
        }))
    }

    fn wire_scalar(&self, value: &Value) -> Result<WireScalar, ValidationError> {
        let scalar = self
            .codec
            .wireify(value)
            .ok_or_else(|| ValidationError::TypeMismatch {
                attribute: self.name.clone(),
                expected: self.codec.logical,
                value: value.to_string(),
            })?;

        Ok(match scalar {
            WireScalar::Text(text) if self.codec.wire_class == WireClass::String => {
                WireScalar::Text(self.format.apply(text))
            }
            other => other,
        })
    }

    fn dewire_scalar(&self, raw: WireRef<'_>) -> Result<Value, DecodeError> {
        self.codec
            .dewireify(raw)
            .map_err(|reason| DecodeError::Malformed {
                attribute: self.name.clone(),
                expected: self.codec.logical,
                value: raw.text().into_owned(),
                reason,
            })
    }
}
