//! Character document types
//!
//! A character's fields mirror its universe's guide: groups keyed by name,
//! each holding fields keyed by name. Field values are typed by
//! [`FieldType`]; a cleared (redacted or null) value is `None`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::guide::FieldType;

/// Value of an options field: one choice, or several when the guide allows it
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsValue {
    Single(String),
    Multiple(Vec<String>),
}

/// A typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Description(String),
    Number(f64),
    Toggle(bool),
    Progress(f64),
    Options(OptionsValue),
    List(Vec<String>),
    /// Opaque image reference, resolved by the storage layer
    Picture(Value),
}

impl FieldValue {
    /// Returns the field type this value belongs to
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Description(_) => FieldType::Description,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Toggle(_) => FieldType::Toggle,
            FieldValue::Progress(_) => FieldType::Progress,
            FieldValue::Options(_) => FieldType::Options,
            FieldValue::List(_) => FieldType::List,
            FieldValue::Picture(_) => FieldType::Picture,
        }
    }
}

/// A single field of a character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterField {
    pub field_type: FieldType,
    /// `None` when null or withheld
    pub value: Option<FieldValue>,
    pub hidden: bool,
}

impl CharacterField {
    /// Creates a visible field holding `value`
    pub fn new(value: FieldValue) -> Self {
        Self {
            field_type: value.field_type(),
            value: Some(value),
            hidden: false,
        }
    }

    /// Creates a field of the given type with no value
    pub fn empty(field_type: FieldType) -> Self {
        Self {
            field_type,
            value: None,
            hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// A group of character fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterGroup {
    pub fields: BTreeMap<String, CharacterField>,
    pub hidden: bool,
}

impl CharacterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any field with the same name
    pub fn with_field(mut self, name: impl Into<String>, field: CharacterField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// All field groups of a character.
///
/// Serialized as `{"groups": {name: {"fields": {name: {value, type, hidden}}, "hidden"}}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "super::codec::RawCharacterFields", into = "super::codec::RawCharacterFields")]
pub struct CharacterFields {
    pub groups: BTreeMap<String, CharacterGroup>,
}

impl CharacterFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group, replacing any group with the same name
    pub fn with_group(mut self, name: impl Into<String>, group: CharacterGroup) -> Self {
        self.groups.insert(name.into(), group);
        self
    }

    /// Looks up a field by group and field name
    pub fn field(&self, group: &str, field: &str) -> Option<&CharacterField> {
        self.groups.get(group).and_then(|g| g.fields.get(field))
    }
}

/// Parsed parts of a character's display name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterName {
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
}

impl CharacterName {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        preferred_name: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            preferred_name: preferred_name.into(),
        }
    }

    /// Surname used for ordering: the preferred name when set, else the last name
    pub fn effective_surname(&self) -> &str {
        if self.preferred_name.is_empty() {
            &self.last_name
        } else {
            &self.preferred_name
        }
    }
}

/// Visibility settings and name metadata of a character
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterMeta {
    /// Hidden from members who do not own it
    pub hidden: bool,
    /// Display name withheld from members who do not own it
    pub name_hidden: bool,
    pub name: CharacterName,
}

/// A stored character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: Uuid,
    pub universe_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub tag: String,
    pub fields: CharacterFields,
    #[serde(default)]
    pub meta: CharacterMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Projects the character onto its list-view reference
    pub fn reference(&self) -> CharacterReference {
        CharacterReference {
            id: self.id,
            universe_id: self.universe_id,
            owner_id: self.owner_id,
            name: self.name.clone(),
            tag: self.tag.clone(),
            avatar_url: None,
            hidden: self.meta.hidden,
            name_hidden: self.meta.name_hidden,
            name_parts: Some(self.meta.name.clone()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Data-minimized character used by list views; never carries fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterReference {
    pub id: Uuid,
    pub universe_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub name_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_parts: Option<CharacterName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CharacterReference {
    pub fn first_name(&self) -> &str {
        self.name_parts.as_ref().map_or("", |n| n.first_name.as_str())
    }

    pub fn last_name(&self) -> &str {
        self.name_parts.as_ref().map_or("", |n| n.last_name.as_str())
    }

    pub fn effective_surname(&self) -> &str {
        self.name_parts.as_ref().map_or("", |n| n.effective_surname())
    }
}

/// Payload for creating a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    #[serde(default)]
    pub tag: String,
    pub fields: CharacterFields,
    #[serde(default)]
    pub meta: CharacterMeta,
}
