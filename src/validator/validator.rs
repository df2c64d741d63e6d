//! Character validator
//!
//! Validation runs two passes and stops at the first failure:
//!
//! 1. Guide-driven: every guide group and field, in guide order, is checked
//!    for presence (when required), type, and its type-specific constraints.
//! 2. Closed-world: every character group and field must be documented by
//!    the guide.
//!
//! The input is never mutated; a normalized copy is returned on success.

use super::checks::{check_value, FieldSite};
use super::errors::{ValidationError, ValidationResult};
use crate::character::{CharacterDraft, CharacterFields};
use crate::guide::Guide;

/// Validates characters against one guide
pub struct CharacterValidator<'a> {
    guide: &'a Guide,
}

impl<'a> CharacterValidator<'a> {
    pub fn new(guide: &'a Guide) -> Self {
        Self { guide }
    }

    /// Validates character fields and returns their normalized form.
    ///
    /// # Errors
    ///
    /// - `CHAR_GROUP_REQUIRED` / `CHAR_FIELD_REQUIRED` for missing required content
    /// - `CHAR_TYPE_MISMATCH` when a field's type or value shape is wrong
    /// - a constraint code when a value is out of range or not allowed
    /// - `CHAR_UNDOCUMENTED_GROUP` / `CHAR_UNDOCUMENTED_FIELD` for extra content
    pub fn validate(&self, fields: &CharacterFields) -> ValidationResult<CharacterFields> {
        let normalized = self.check_required(fields)?;
        self.check_documented(fields)?;
        Ok(normalized)
    }

    /// Validates a create payload: the name must be non-empty and the
    /// fields must validate. Name and tag are trimmed.
    pub fn validate_draft(&self, draft: &CharacterDraft) -> ValidationResult<CharacterDraft> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::name_required());
        }
        Ok(CharacterDraft {
            name: name.to_string(),
            tag: draft.tag.trim().to_string(),
            fields: self.validate(&draft.fields)?,
            meta: draft.meta.clone(),
        })
    }

    /// Pass 1: guide-driven presence, type and constraint checks
    fn check_required(&self, fields: &CharacterFields) -> ValidationResult<CharacterFields> {
        let mut normalized = fields.clone();

        for guide_group in &self.guide.groups {
            let Some(group) = fields.groups.get(&guide_group.name) else {
                if guide_group.required {
                    return Err(ValidationError::group_required(&guide_group.name));
                }
                continue;
            };

            for guide_field in &guide_group.fields {
                let Some(field) = group.fields.get(&guide_field.name) else {
                    if guide_field.required {
                        return Err(ValidationError::field_required(
                            &guide_group.name,
                            &guide_field.name,
                        ));
                    }
                    continue;
                };

                if field.field_type != guide_field.field_type() {
                    return Err(ValidationError::wrong_type(
                        &guide_group.name,
                        &guide_field.name,
                        guide_field.field_type(),
                    ));
                }

                let site = FieldSite {
                    group: &guide_group.name,
                    field: &guide_field.name,
                };
                let value = check_value(site, &guide_field.constraints, field.value.as_ref())?;

                if let Some(slot) = normalized
                    .groups
                    .get_mut(&guide_group.name)
                    .and_then(|g| g.fields.get_mut(&guide_field.name))
                {
                    slot.value = value;
                }
            }
        }

        Ok(normalized)
    }

    /// Pass 2: reject groups and fields the guide does not document
    fn check_documented(&self, fields: &CharacterFields) -> ValidationResult<()> {
        for (group_name, group) in &fields.groups {
            let guide_group = self
                .guide
                .group(group_name)
                .ok_or_else(|| ValidationError::undocumented_group(group_name))?;

            for field_name in group.fields.keys() {
                if guide_group.field(field_name).is_none() {
                    return Err(ValidationError::undocumented_field(group_name, field_name));
                }
            }
        }
        Ok(())
    }
}

/// Validates `fields` against `guide`, returning the normalized fields
pub fn validate(fields: &CharacterFields, guide: &Guide) -> ValidationResult<CharacterFields> {
    CharacterValidator::new(guide).validate(fields)
}
