//! Structural rules a guide must satisfy before characters are checked against it

use std::collections::HashSet;

use super::errors::{GuideError, GuideResult};
use super::types::{FieldConstraints, Guide, GuideField, GuideGroup};

impl Guide {
    /// Validates the guide itself (not a character).
    ///
    /// Group names are non-empty and unique, every group has at least one
    /// field, field names are non-empty and unique within their group, and
    /// each field's constraints are internally consistent.
    pub fn validate_structure(&self) -> GuideResult<()> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(GuideError::invalid_group(&group.name, "must have a name"));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(GuideError::invalid_group(&group.name, "is declared more than once"));
            }
            validate_group(group)?;
        }
        Ok(())
    }
}

fn validate_group(group: &GuideGroup) -> GuideResult<()> {
    if group.fields.is_empty() {
        return Err(GuideError::invalid_group(&group.name, "must contain at least one field"));
    }

    let mut seen = HashSet::new();
    for field in &group.fields {
        if field.name.trim().is_empty() {
            return Err(GuideError::invalid_field(&group.name, &field.name, "must have a name"));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(GuideError::invalid_field(
                &group.name,
                &field.name,
                "is declared more than once",
            ));
        }
        validate_constraints(&group.name, field)?;
    }
    Ok(())
}

fn validate_constraints(group: &str, field: &GuideField) -> GuideResult<()> {
    let fail = |reason: String| Err(GuideError::invalid_field(group, &field.name, reason));

    match &field.constraints {
        FieldConstraints::Text(m) => {
            if m.max_length < m.min_length {
                return fail("has maxLength below minLength".into());
            }
        }
        FieldConstraints::Description(m) => {
            if m.max_length < m.min_length {
                return fail("has maxLength below minLength".into());
            }
        }
        FieldConstraints::Number(m) => {
            if !(m.max >= m.min) {
                return fail("has max below min".into());
            }
            if !(m.tick >= 0.0) {
                return fail("has a negative tick".into());
            }
        }
        FieldConstraints::Progress(m) => {
            if !(m.min >= 0.0) {
                return fail("has a negative min".into());
            }
            if !(m.max >= m.min) {
                return fail("has max below min".into());
            }
            if !(m.tick >= 0.0 && m.tick <= m.max) {
                return fail("has a tick outside of 0 and max".into());
            }
        }
        FieldConstraints::Options(m) => {
            if m.options.is_empty() {
                return fail("must allow at least one option".into());
            }
        }
        FieldConstraints::List(m) => {
            if m.max_elements < m.min_elements {
                return fail("has maxElements below minElements".into());
            }
        }
        FieldConstraints::Toggle | FieldConstraints::Picture => {}
    }
    Ok(())
}
