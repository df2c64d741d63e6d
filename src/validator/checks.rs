//! Per-type field checks
//!
//! One checker per field type, reached through a single match on the
//! guide constraints. Each checker normalizes first (trimming strings and
//! list elements) and then checks the normalized value, so its output
//! always passes the same checker again.

use super::errors::{ValidationError, ValidationResult};
use crate::character::{FieldValue, OptionsValue};
use crate::guide::{
    DescriptionMeta, FieldConstraints, ListMeta, NumberMeta, OptionsMeta, ProgressMeta, TextMeta,
};

/// Relative slack allowed when checking a value against a tick
const TICK_TOLERANCE: f64 = 1e-9;

/// Location of the field being checked, for error messages
#[derive(Debug, Clone, Copy)]
pub(super) struct FieldSite<'a> {
    pub group: &'a str,
    pub field: &'a str,
}

/// Checks a present field value against its guide constraints and returns
/// the normalized value.
///
/// Picture references are opaque and pass unchecked, `null` included.
pub(super) fn check_value(
    site: FieldSite<'_>,
    constraints: &FieldConstraints,
    value: Option<&FieldValue>,
) -> ValidationResult<Option<FieldValue>> {
    let mismatch = |expected: &str| ValidationError::type_mismatch(site.group, site.field, expected);

    let checked = match (constraints, value) {
        (FieldConstraints::Picture, _) => return Ok(value.cloned()),
        (FieldConstraints::Text(meta), Some(FieldValue::Text(s))) => {
            check_text(site, meta, s).map(FieldValue::Text)
        }
        (FieldConstraints::Description(meta), Some(FieldValue::Description(s))) => {
            check_description(site, meta, s).map(FieldValue::Description)
        }
        (FieldConstraints::Number(meta), Some(FieldValue::Number(n))) => {
            check_number(site, meta, *n).map(FieldValue::Number)
        }
        (FieldConstraints::Progress(meta), Some(FieldValue::Progress(n))) => {
            check_progress(site, meta, *n).map(FieldValue::Progress)
        }
        (FieldConstraints::Toggle, Some(FieldValue::Toggle(b))) => Ok(FieldValue::Toggle(*b)),
        (FieldConstraints::Options(meta), Some(FieldValue::Options(v))) => {
            check_options(site, meta, v).map(FieldValue::Options)
        }
        (FieldConstraints::List(meta), Some(FieldValue::List(items))) => {
            check_list(site, meta, items).map(FieldValue::List)
        }
        (FieldConstraints::Number(meta), _) if !meta.float => Err(mismatch("an integer")),
        (FieldConstraints::Number(_), _) | (FieldConstraints::Progress(_), _) => Err(mismatch("a float")),
        (FieldConstraints::Toggle, _) => Err(mismatch("a boolean")),
        (FieldConstraints::Options(meta), _) if meta.multiple => Err(mismatch("a string list")),
        (FieldConstraints::List(_), _) => Err(mismatch("a string list")),
        (FieldConstraints::Text(_), _)
        | (FieldConstraints::Description(_), _)
        | (FieldConstraints::Options(_), _) => Err(mismatch("a string")),
    };
    checked.map(Some)
}

fn check_length(site: FieldSite<'_>, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let length = value.chars().count();
    if length < min || length > max {
        return Err(ValidationError::range(
            site.group,
            site.field,
            format_args!("must be in range of {} and {} characters", min, max),
        ));
    }
    Ok(())
}

fn check_text(site: FieldSite<'_>, meta: &TextMeta, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if !meta.pattern.is_match(value) {
        return Err(ValidationError::pattern_mismatch(site.group, site.field, meta.pattern.as_str()));
    }
    check_length(site, value, meta.min_length, meta.max_length)?;
    Ok(value.to_string())
}

fn check_description(
    site: FieldSite<'_>,
    meta: &DescriptionMeta,
    value: &str,
) -> ValidationResult<String> {
    let value = value.trim();
    check_length(site, value, meta.min_length, meta.max_length)?;
    Ok(value.to_string())
}

fn check_number(site: FieldSite<'_>, meta: &NumberMeta, value: f64) -> ValidationResult<f64> {
    if !meta.float && value.fract() != 0.0 {
        return Err(ValidationError::type_mismatch(site.group, site.field, "an integer"));
    }
    check_range(site, value, meta.min, meta.max, meta.tick)?;
    Ok(value)
}

fn check_progress(site: FieldSite<'_>, meta: &ProgressMeta, value: f64) -> ValidationResult<f64> {
    check_range(site, value, meta.min, meta.max, meta.tick)?;
    Ok(value)
}

fn check_range(site: FieldSite<'_>, value: f64, min: f64, max: f64, tick: f64) -> ValidationResult<()> {
    if !(value >= min && value <= max) {
        return Err(ValidationError::range(
            site.group,
            site.field,
            format_args!("must be in range of {} and {}", min, max),
        ));
    }
    if !is_multiple_of(value, tick) {
        return Err(ValidationError::range(
            site.group,
            site.field,
            format_args!("must be divisible by {}", tick),
        ));
    }
    Ok(())
}

/// Whether `value` is a whole multiple of `tick`.
///
/// A zero tick disables the check. The quotient may sit within a relative
/// `TICK_TOLERANCE` of an integer, so `0.3` is a multiple of `0.1`.
pub(crate) fn is_multiple_of(value: f64, tick: f64) -> bool {
    if tick == 0.0 {
        return true;
    }
    let quotient = value / tick;
    (quotient - quotient.round()).abs() <= TICK_TOLERANCE * quotient.abs().max(1.0)
}

fn check_options(
    site: FieldSite<'_>,
    meta: &OptionsMeta,
    value: &OptionsValue,
) -> ValidationResult<OptionsValue> {
    match (meta.multiple, value) {
        (true, OptionsValue::Multiple(items)) => {
            let mut normalized = Vec::with_capacity(items.len());
            for item in items {
                let item = item.trim();
                if !meta.allows(item) {
                    return Err(ValidationError::membership(site.group, site.field, &meta.options));
                }
                normalized.push(item.to_string());
            }
            Ok(OptionsValue::Multiple(normalized))
        }
        (false, OptionsValue::Single(item)) => {
            let item = item.trim();
            if !meta.allows(item) {
                return Err(ValidationError::membership(site.group, site.field, &meta.options));
            }
            Ok(OptionsValue::Single(item.to_string()))
        }
        (true, OptionsValue::Single(_)) => {
            Err(ValidationError::type_mismatch(site.group, site.field, "a string list"))
        }
        (false, OptionsValue::Multiple(_)) => {
            Err(ValidationError::type_mismatch(site.group, site.field, "a string"))
        }
    }
}

fn check_list(site: FieldSite<'_>, meta: &ListMeta, items: &[String]) -> ValidationResult<Vec<String>> {
    let mut normalized = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if item.is_empty() {
            return Err(ValidationError::type_mismatch(
                site.group,
                site.field,
                "a list of non-empty strings",
            ));
        }
        normalized.push(item.to_string());
    }
    if normalized.len() < meta.min_elements || normalized.len() > meta.max_elements {
        return Err(ValidationError::count(
            site.group,
            site.field,
            meta.min_elements,
            meta.max_elements,
        ));
    }
    Ok(normalized)
}
