//! Universe records and the defaults handed to new universes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{FieldConstraints, Guide, GuideField, GuideGroup, TextMeta, TextPattern};

/// Per-universe settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseSettings {
    /// Label shown for the character name
    pub title_field: String,
    #[serde(default)]
    pub allow_avatars: bool,
    /// Whether lists may be ordered by surname
    #[serde(default)]
    pub allow_lexicographical_ordering: bool,
}

/// A workspace owning one guide and its characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub guide: Guide,
    pub settings: UniverseSettings,
}

impl Universe {
    /// Creates a universe seeded from the given defaults
    pub fn new(name: impl Into<String>, description: impl Into<String>, defaults: &GuideDefaults) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            guide: defaults.guide.clone(),
            settings: defaults.settings.clone(),
        }
    }
}

/// Guide and settings every new universe starts from.
///
/// Built once at startup and passed to whatever creates universes.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideDefaults {
    pub guide: Guide,
    pub settings: UniverseSettings,
}

impl GuideDefaults {
    /// The built-in defaults: a `General` group with a required `Biography`
    pub fn standard() -> Self {
        let biography = GuideField::new(
            "Biography",
            true,
            FieldConstraints::Text(TextMeta {
                pattern: TextPattern::default(),
                min_length: 1,
                max_length: 4000,
            }),
        )
        .with_description("The history of this character");

        Self {
            guide: Guide::new(vec![GuideGroup::new("General", false, vec![biography])]),
            settings: UniverseSettings {
                title_field: "Name".into(),
                allow_avatars: true,
                allow_lexicographical_ordering: false,
            },
        }
    }

    /// Replaces the default guide, keeping the default settings
    pub fn with_guide(mut self, guide: Guide) -> Self {
        self.guide = guide;
        self
    }
}

impl Default for GuideDefaults {
    fn default() -> Self {
        Self::standard()
    }
}
