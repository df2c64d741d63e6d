//! JSON codec for character fields
//!
//! The persisted shape carries an untyped `value` next to its `type`. Decoding
//! interprets the value by type once, so a value that cannot belong to its
//! declared type never reaches the validator as a typed field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::types::{CharacterField, CharacterFields, CharacterGroup, FieldValue, OptionsValue};
use crate::guide::FieldType;
use crate::validator::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawCharacterField {
    #[serde(default)]
    value: Value,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    hidden: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RawCharacterGroup {
    #[serde(default)]
    fields: BTreeMap<String, RawCharacterField>,
    #[serde(default)]
    hidden: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RawCharacterFields {
    #[serde(default)]
    groups: BTreeMap<String, RawCharacterGroup>,
}

impl CharacterFields {
    /// Decodes fields from their persisted JSON shape
    pub fn from_json(value: Value) -> ValidationResult<Self> {
        let raw: RawCharacterFields =
            serde_json::from_value(value).map_err(|e| ValidationError::malformed(e.to_string()))?;
        Self::try_from(raw)
    }

    /// Encodes fields into their persisted JSON shape
    pub fn to_json(&self) -> Value {
        serde_json::to_value(RawCharacterFields::from(self.clone())).unwrap_or(Value::Null)
    }
}

impl TryFrom<RawCharacterFields> for CharacterFields {
    type Error = ValidationError;

    fn try_from(raw: RawCharacterFields) -> Result<Self, Self::Error> {
        let mut groups = BTreeMap::new();
        for (group_name, raw_group) in raw.groups {
            let mut fields = BTreeMap::new();
            for (field_name, raw_field) in raw_group.fields {
                let field = decode_field(&group_name, &field_name, raw_field)?;
                fields.insert(field_name, field);
            }
            groups.insert(
                group_name,
                CharacterGroup {
                    fields,
                    hidden: raw_group.hidden,
                },
            );
        }
        Ok(CharacterFields { groups })
    }
}

impl From<CharacterFields> for RawCharacterFields {
    fn from(fields: CharacterFields) -> Self {
        let groups = fields
            .groups
            .into_iter()
            .map(|(name, group)| {
                let fields = group
                    .fields
                    .into_iter()
                    .map(|(name, field)| {
                        let raw = RawCharacterField {
                            value: field.value.as_ref().map_or(Value::Null, encode_value),
                            field_type: field.field_type,
                            hidden: field.hidden,
                        };
                        (name, raw)
                    })
                    .collect();
                (
                    name,
                    RawCharacterGroup {
                        fields,
                        hidden: group.hidden,
                    },
                )
            })
            .collect();
        RawCharacterFields { groups }
    }
}

fn decode_field(group: &str, field: &str, raw: RawCharacterField) -> ValidationResult<CharacterField> {
    let value = decode_value(raw.field_type, raw.value)
        .map_err(|expected| ValidationError::type_mismatch(group, field, expected))?;
    Ok(CharacterField {
        field_type: raw.field_type,
        value,
        hidden: raw.hidden,
    })
}

/// Interprets a JSON value as a value of `field_type`.
///
/// `null` decodes to `None` for every type. On mismatch the error names the
/// expected shape.
fn decode_value(field_type: FieldType, value: Value) -> Result<Option<FieldValue>, &'static str> {
    if value.is_null() {
        return Ok(None);
    }
    let decoded = match field_type {
        FieldType::Text => FieldValue::Text(into_string(value).ok_or("a string")?),
        FieldType::Description => FieldValue::Description(into_string(value).ok_or("a string")?),
        FieldType::Picture => FieldValue::Picture(value),
        FieldType::Number => FieldValue::Number(value.as_f64().ok_or("a number")?),
        FieldType::Progress => FieldValue::Progress(value.as_f64().ok_or("a float")?),
        FieldType::Toggle => FieldValue::Toggle(value.as_bool().ok_or("a boolean")?),
        FieldType::List => FieldValue::List(into_string_list(value).ok_or("a string list")?),
        FieldType::Options => match value {
            Value::String(s) => FieldValue::Options(OptionsValue::Single(s)),
            other => FieldValue::Options(OptionsValue::Multiple(
                into_string_list(other).ok_or("a string or a string list")?,
            )),
        },
    };
    Ok(Some(decoded))
}

fn into_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn into_string_list(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items.into_iter().map(into_string).collect(),
        _ => None,
    }
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) | FieldValue::Description(s) => Value::String(s.clone()),
        FieldValue::Picture(reference) => reference.clone(),
        FieldValue::Number(n) | FieldValue::Progress(n) => encode_number(*n),
        FieldValue::Toggle(b) => Value::Bool(*b),
        FieldValue::Options(OptionsValue::Single(s)) => Value::String(s.clone()),
        FieldValue::Options(OptionsValue::Multiple(items)) | FieldValue::List(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
    }
}

/// Integral values within i64 range are written as JSON integers
fn encode_number(n: f64) -> Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}
