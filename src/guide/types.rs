//! Guide type definitions
//!
//! A guide is an ordered list of groups, each holding an ordered list of
//! typed fields. Every field carries exactly one constraint shape, chosen
//! by its type:
//!
//! - text: pattern, minLength, maxLength
//! - description: markdown, minLength, maxLength
//! - number: float, min, max, tick
//! - progress: bar, color, min, max, tick
//! - options: multiple, options
//! - list: minElements, maxElements
//! - toggle, picture: none

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use super::errors::GuideError;

/// Closed set of field types shared by guides and characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single line of text
    Text,
    /// Long-form text
    Description,
    /// Integer or float within a range
    Number,
    /// Boolean switch
    Toggle,
    /// Float within a range, rendered as progress
    Progress,
    /// One or more values from a fixed set
    Options,
    /// Free list of strings
    List,
    /// Opaque image reference
    Picture,
}

impl FieldType {
    /// Every field type, in declaration order
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Description,
        FieldType::Number,
        FieldType::Toggle,
        FieldType::Progress,
        FieldType::Options,
        FieldType::List,
        FieldType::Picture,
    ];

    /// Returns the wire name of the type
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Description => "description",
            FieldType::Number => "number",
            FieldType::Toggle => "toggle",
            FieldType::Progress => "progress",
            FieldType::Options => "options",
            FieldType::List => "list",
            FieldType::Picture => "picture",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Bar color for a progress field rendered as a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBarColor {
    Red,
    Yellow,
    Green,
    #[default]
    Blue,
    Teal,
    Gray,
    Dark,
}

/// Compiled text pattern, serialized as its source.
///
/// Compiled once when the guide is decoded; an empty source matches
/// everything.
#[derive(Debug, Clone, Default)]
pub struct TextPattern(Option<Regex>);

impl TextPattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        if source.is_empty() {
            return Ok(Self(None));
        }
        Regex::new(source).map(|regex| Self(Some(regex)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref().map_or("", Regex::as_str)
    }

    /// True when `value` contains a match
    pub fn is_match(&self, value: &str) -> bool {
        self.0.as_ref().map_or(true, |regex| regex.is_match(value))
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for TextPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TextPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        TextPattern::new(&source)
            .map_err(|e| serde::de::Error::custom(format!("invalid pattern: {}", e)))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextMeta {
    /// Regular expression the value must contain a match for
    pub pattern: TextPattern,
    pub min_length: usize,
    pub max_length: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescriptionMeta {
    /// Rendering hint only, not checked
    pub markdown: bool,
    pub min_length: usize,
    pub max_length: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberMeta {
    /// Whether fractional values are allowed
    #[serde(alias = "isFloat")]
    pub float: bool,
    pub min: f64,
    pub max: f64,
    /// Step the value must be a multiple of (0 disables the check)
    pub tick: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressMeta {
    pub bar: bool,
    pub color: ProgressBarColor,
    pub min: f64,
    pub max: f64,
    pub tick: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsMeta {
    /// Whether a list of options may be selected
    pub multiple: bool,
    /// Allowed values
    #[serde(alias = "allowedOptions")]
    pub options: Vec<String>,
}

impl OptionsMeta {
    pub fn allows(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListMeta {
    pub min_elements: usize,
    pub max_elements: usize,
}

/// Type-specific constraints of a guide field.
///
/// The variant determines the field's type, so a field can never carry a
/// constraint shape that disagrees with its type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConstraints {
    Text(TextMeta),
    Description(DescriptionMeta),
    Number(NumberMeta),
    Toggle,
    Progress(ProgressMeta),
    Options(OptionsMeta),
    List(ListMeta),
    Picture,
}

impl FieldConstraints {
    /// Returns the field type these constraints belong to
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldConstraints::Text(_) => FieldType::Text,
            FieldConstraints::Description(_) => FieldType::Description,
            FieldConstraints::Number(_) => FieldType::Number,
            FieldConstraints::Toggle => FieldType::Toggle,
            FieldConstraints::Progress(_) => FieldType::Progress,
            FieldConstraints::Options(_) => FieldType::Options,
            FieldConstraints::List(_) => FieldType::List,
            FieldConstraints::Picture => FieldType::Picture,
        }
    }

    /// Decodes the persisted `meta` object for the given type.
    ///
    /// Toggle and picture fields have no constraints; their `meta` is ignored.
    pub fn decode(field_type: FieldType, meta: Value) -> Result<Self, serde_json::Error> {
        // Absent meta means all defaults
        let meta = if meta.is_null() {
            Value::Object(Default::default())
        } else {
            meta
        };
        Ok(match field_type {
            FieldType::Text => FieldConstraints::Text(serde_json::from_value(meta)?),
            FieldType::Description => FieldConstraints::Description(serde_json::from_value(meta)?),
            FieldType::Number => FieldConstraints::Number(serde_json::from_value(meta)?),
            FieldType::Toggle => FieldConstraints::Toggle,
            FieldType::Progress => FieldConstraints::Progress(serde_json::from_value(meta)?),
            FieldType::Options => FieldConstraints::Options(serde_json::from_value(meta)?),
            FieldType::List => FieldConstraints::List(serde_json::from_value(meta)?),
            FieldType::Picture => FieldConstraints::Picture,
        })
    }

    /// Encodes the constraints back into a `meta` object
    pub fn encode(&self) -> Value {
        let encoded = match self {
            FieldConstraints::Text(m) => serde_json::to_value(m),
            FieldConstraints::Description(m) => serde_json::to_value(m),
            FieldConstraints::Number(m) => serde_json::to_value(m),
            FieldConstraints::Progress(m) => serde_json::to_value(m),
            FieldConstraints::Options(m) => serde_json::to_value(m),
            FieldConstraints::List(m) => serde_json::to_value(m),
            FieldConstraints::Toggle | FieldConstraints::Picture => Ok(Value::Object(Default::default())),
        };
        encoded.unwrap_or(Value::Null)
    }
}

/// Persisted shape of a guide field
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGuideField {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    required: bool,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    meta: Value,
}

/// A single field definition inside a guide group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGuideField", into = "RawGuideField")]
pub struct GuideField {
    pub name: String,
    /// Help text shown to users
    pub description: String,
    pub required: bool,
    pub constraints: FieldConstraints,
}

impl GuideField {
    pub fn new(name: impl Into<String>, required: bool, constraints: FieldConstraints) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required,
            constraints,
        }
    }

    /// Sets the help text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.constraints.field_type()
    }
}

impl TryFrom<RawGuideField> for GuideField {
    type Error = GuideError;

    fn try_from(raw: RawGuideField) -> Result<Self, Self::Error> {
        let constraints = FieldConstraints::decode(raw.field_type, raw.meta).map_err(|e| {
            GuideError::malformed_meta(&raw.name, raw.field_type, e.to_string())
        })?;
        Ok(Self {
            name: raw.name,
            description: raw.description,
            required: raw.required,
            constraints,
        })
    }
}

impl From<GuideField> for RawGuideField {
    fn from(field: GuideField) -> Self {
        Self {
            field_type: field.field_type(),
            meta: field.constraints.encode(),
            name: field.name,
            description: field.description,
            required: field.required,
        }
    }
}

/// A named group of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideGroup {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    pub fields: Vec<GuideField>,
}

impl GuideGroup {
    pub fn new(name: impl Into<String>, required: bool, fields: Vec<GuideField>) -> Self {
        Self {
            name: name.into(),
            required,
            fields,
        }
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&GuideField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Complete guide of a universe
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Guide {
    pub groups: Vec<GuideGroup>,
}

impl Guide {
    pub fn new(groups: Vec<GuideGroup>) -> Self {
        Self { groups }
    }

    /// Looks up a group by name
    pub fn group(&self, name: &str) -> Option<&GuideGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}
