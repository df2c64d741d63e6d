//! Validation Invariant Tests
//!
//! Tests for character validation invariants:
//! - Required groups and fields must be present
//! - Undocumented groups and fields are always rejected
//! - Normalization is idempotent
//! - Validation never mutates its input
//! - Type-specific constraints are enforced

use charbase::character::{CharacterFields, FieldValue, OptionsValue};
use charbase::guide::{Guide, GuideDefaults, GuideErrorCode, GuideLoader};
use charbase::validator::{validate, ValidationErrorCode};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn rich_guide() -> Guide {
    GuideLoader::from_value(json!({
        "groups": [
            {
                "name": "General",
                "required": true,
                "fields": [
                    {
                        "name": "Biography",
                        "description": "The history of this character",
                        "required": true,
                        "type": "text",
                        "meta": { "pattern": "", "minLength": 1, "maxLength": 4000 }
                    },
                    {
                        "name": "Notes",
                        "required": false,
                        "type": "description",
                        "meta": { "markdown": true, "minLength": 0, "maxLength": 100 }
                    }
                ]
            },
            {
                "name": "Stats",
                "required": false,
                "fields": [
                    {
                        "name": "Level",
                        "required": false,
                        "type": "number",
                        "meta": { "isFloat": false, "min": 0, "max": 10, "tick": 2 }
                    },
                    {
                        "name": "Weight",
                        "required": false,
                        "type": "number",
                        "meta": { "float": true, "min": 0, "max": 1, "tick": 0.1 }
                    },
                    {
                        "name": "Health",
                        "required": false,
                        "type": "progress",
                        "meta": { "bar": true, "color": "red", "min": 0, "max": 100, "tick": 5 }
                    },
                    {
                        "name": "Alive",
                        "required": false,
                        "type": "toggle",
                        "meta": {}
                    }
                ]
            },
            {
                "name": "Looks",
                "required": false,
                "fields": [
                    {
                        "name": "Eyes",
                        "required": false,
                        "type": "options",
                        "meta": { "multiple": false, "allowedOptions": ["red", "blue"] }
                    },
                    {
                        "name": "Hair",
                        "required": false,
                        "type": "options",
                        "meta": { "multiple": true, "options": ["long", "curly", "dark"] }
                    },
                    {
                        "name": "Scars",
                        "required": false,
                        "type": "list",
                        "meta": { "minElements": 0, "maxElements": 3 }
                    },
                    {
                        "name": "Portrait",
                        "required": false,
                        "type": "picture"
                    }
                ]
            }
        ]
    }))
    .unwrap()
}

fn general(bio: &str) -> Value {
    json!({ "fields": { "Biography": { "value": bio, "type": "text" } } })
}

fn fields(groups: Value) -> CharacterFields {
    CharacterFields::from_json(json!({ "groups": groups })).unwrap()
}

fn field(group: &str, name: &str, value: Value, field_type: &str) -> CharacterFields {
    fields(json!({
        "General": general("A hobbit"),
        group: { "fields": { name: { "value": value, "type": field_type } } }
    }))
}

fn code_of(fields: &CharacterFields, guide: &Guide) -> ValidationErrorCode {
    validate(fields, guide).unwrap_err().code()
}

// =============================================================================
// Required Enforcement Tests
// =============================================================================

/// Omitting a required field names the field and its group.
#[test]
fn test_missing_required_field_is_reported() {
    let guide = GuideDefaults::standard().guide;
    let doc = fields(json!({ "General": { "fields": {} } }));

    let err = validate(&doc, &guide).unwrap_err();
    assert_eq!(err.code(), ValidationErrorCode::FieldRequired);
    assert_eq!(err.field(), Some("Biography"));
    assert_eq!(err.group(), Some("General"));
}

/// A required group must be present.
#[test]
fn test_missing_required_group_is_reported() {
    let guide = rich_guide();
    let doc = fields(json!({}));
    assert_eq!(code_of(&doc, &guide), ValidationErrorCode::GroupRequired);
}

/// An optional group may be omitted entirely.
#[test]
fn test_optional_group_may_be_absent() {
    let guide = GuideDefaults::standard().guide;
    assert!(validate(&fields(json!({})), &guide).is_ok());
}

// =============================================================================
// Closed-World Tests
// =============================================================================

/// Extra groups are rejected even when everything else is valid.
#[test]
fn test_undocumented_group_always_rejected() {
    let guide = rich_guide();
    let doc = fields(json!({
        "General": general("A hobbit"),
        "Smuggled": { "fields": {} }
    }));
    assert_eq!(code_of(&doc, &guide), ValidationErrorCode::UndocumentedGroup);
}

/// Extra fields in a documented group are rejected.
#[test]
fn test_undocumented_field_always_rejected() {
    let guide = rich_guide();
    let doc = field("Stats", "Mana", json!(3), "number");
    assert_eq!(code_of(&doc, &guide), ValidationErrorCode::UndocumentedField);
}

// =============================================================================
// Normalization Tests
// =============================================================================

/// Strings are trimmed.
#[test]
fn test_text_is_trimmed() {
    let guide = GuideDefaults::standard().guide;
    let doc = fields(json!({ "General": general("  hello  ") }));

    let normalized = validate(&doc, &guide).unwrap();
    assert_eq!(
        normalized.field("General", "Biography").unwrap().value,
        Some(FieldValue::Text("hello".into()))
    );
}

/// Validating normalized output again changes nothing.
#[test]
fn test_normalization_is_idempotent() {
    let guide = rich_guide();
    let doc = fields(json!({
        "General": {
            "fields": {
                "Biography": { "value": "  Ring bearer ", "type": "text" },
                "Notes": { "value": " *brave* ", "type": "description", "hidden": true }
            }
        },
        "Stats": {
            "hidden": true,
            "fields": {
                "Level": { "value": 4, "type": "number" },
                "Weight": { "value": 0.3, "type": "number" },
                "Health": { "value": 85, "type": "progress" },
                "Alive": { "value": true, "type": "toggle" }
            }
        },
        "Looks": {
            "fields": {
                "Eyes": { "value": " blue ", "type": "options" },
                "Hair": { "value": [" curly", "dark "], "type": "options" },
                "Scars": { "value": [" left cheek "], "type": "list" },
                "Portrait": { "value": "images/frodo.png", "type": "picture" }
            }
        }
    }));

    let once = validate(&doc, &guide).unwrap();
    let twice = validate(&once, &guide).unwrap();
    assert_eq!(once, twice);
    assert_eq!(
        once.field("Looks", "Hair").unwrap().value,
        Some(FieldValue::Options(OptionsValue::Multiple(vec![
            "curly".into(),
            "dark".into()
        ])))
    );
    assert_eq!(
        once.field("Looks", "Scars").unwrap().value,
        Some(FieldValue::List(vec!["left cheek".into()]))
    );
}

/// The caller's document is never modified.
#[test]
fn test_input_not_mutated() {
    let guide = GuideDefaults::standard().guide;
    let doc = fields(json!({ "General": general("  hello  ") }));
    let before = doc.clone();
    let _ = validate(&doc, &guide);
    assert_eq!(doc, before);
}

/// Normalized fields keep the persisted JSON shape.
#[test]
fn test_normalized_json_shape() {
    let guide = GuideDefaults::standard().guide;
    let doc = fields(json!({ "General": general(" hi ") }));
    let json = validate(&doc, &guide).unwrap().to_json();
    assert_eq!(
        json,
        json!({
            "groups": {
                "General": {
                    "fields": { "Biography": { "value": "hi", "type": "text", "hidden": false } },
                    "hidden": false
                }
            }
        })
    );
}

// =============================================================================
// Constraint Tests
// =============================================================================

/// Integer numbers must be divisible by the tick.
#[test]
fn test_number_tick() {
    let guide = rich_guide();
    assert_eq!(
        code_of(&field("Stats", "Level", json!(3), "number"), &guide),
        ValidationErrorCode::RangeViolation
    );
    assert!(validate(&field("Stats", "Level", json!(4), "number"), &guide).is_ok());
}

/// Integer numbers reject fractions.
#[test]
fn test_number_integer_required() {
    let guide = rich_guide();
    assert_eq!(
        code_of(&field("Stats", "Level", json!(4.5), "number"), &guide),
        ValidationErrorCode::TypeMismatch
    );
}

/// Fractional ticks accept values that are multiples up to float error.
#[test]
fn test_fractional_tick() {
    let guide = rich_guide();
    for ok in [0.0, 0.1, 0.3, 0.7, 1.0] {
        assert!(
            validate(&field("Stats", "Weight", json!(ok), "number"), &guide).is_ok(),
            "{} should be accepted",
            ok
        );
    }
    assert_eq!(
        code_of(&field("Stats", "Weight", json!(0.35), "number"), &guide),
        ValidationErrorCode::RangeViolation
    );
}

/// Numbers outside the range are rejected.
#[test]
fn test_number_range() {
    let guide = rich_guide();
    assert_eq!(
        code_of(&field("Stats", "Level", json!(12), "number"), &guide),
        ValidationErrorCode::RangeViolation
    );
    assert_eq!(
        code_of(&field("Stats", "Health", json!(105), "progress"), &guide),
        ValidationErrorCode::RangeViolation
    );
}

/// Single options must be allowed values.
#[test]
fn test_single_option_membership() {
    let guide = rich_guide();
    let err = validate(&field("Looks", "Eyes", json!("green"), "options"), &guide).unwrap_err();
    assert_eq!(err.code(), ValidationErrorCode::MembershipViolation);
    assert!(err.message().contains("red"));
}

/// Every element of a multiple option must be allowed.
#[test]
fn test_multiple_option_membership() {
    let guide = rich_guide();
    assert_eq!(
        code_of(&field("Looks", "Hair", json!(["long", "bald"]), "options"), &guide),
        ValidationErrorCode::MembershipViolation
    );
    assert_eq!(
        code_of(&field("Looks", "Hair", json!("long"), "options"), &guide),
        ValidationErrorCode::TypeMismatch
    );
}

/// List element counts are bounded and elements must not be blank.
#[test]
fn test_list_constraints() {
    let guide = rich_guide();
    assert_eq!(
        code_of(&field("Looks", "Scars", json!(["a", "b", "c", "d"]), "list"), &guide),
        ValidationErrorCode::CountViolation
    );
    assert_eq!(
        code_of(&field("Looks", "Scars", json!(["a", "  "]), "list"), &guide),
        ValidationErrorCode::TypeMismatch
    );
}

/// A field declaring a different type than the guide is rejected.
#[test]
fn test_declared_type_mismatch() {
    let guide = rich_guide();
    assert_eq!(
        code_of(&field("Stats", "Alive", json!("yes"), "text"), &guide),
        ValidationErrorCode::TypeMismatch
    );
}

/// A value that cannot belong to its declared type never decodes.
#[test]
fn test_value_shape_rejected_at_decode() {
    let err = CharacterFields::from_json(json!({
        "groups": { "Stats": { "fields": { "Alive": { "value": "yes", "type": "toggle" } } } }
    }))
    .unwrap_err();
    assert_eq!(err.code(), ValidationErrorCode::TypeMismatch);
    assert_eq!(err.field(), Some("Alive"));
}

/// Picture references are not checked here, whatever their shape.
#[test]
fn test_picture_reference_is_opaque() {
    let guide = rich_guide();
    for reference in [json!(null), json!({ "key": "avatar" }), json!(42), json!("portraits/sam.png")] {
        let doc = field("Looks", "Portrait", reference.clone(), "picture");
        let normalized = validate(&doc, &guide).unwrap();
        assert_eq!(
            normalized.to_json()["groups"]["Looks"]["fields"]["Portrait"]["value"],
            reference
        );
    }
}

/// A required picture may still be waiting for its upload.
#[test]
fn test_required_picture_may_be_null() {
    let guide = GuideLoader::from_value(json!({
        "groups": [{
            "name": "General",
            "required": true,
            "fields": [{ "name": "Portrait", "required": true, "type": "picture" }]
        }]
    }))
    .unwrap();
    let doc = fields(json!({
        "General": { "fields": { "Portrait": { "value": null, "type": "picture" } } }
    }));
    assert!(validate(&doc, &guide).is_ok());
}

/// Text patterns must match.
#[test]
fn test_text_pattern() {
    let guide = GuideLoader::from_value(json!({
        "groups": [{
            "name": "General",
            "required": true,
            "fields": [{
                "name": "Code",
                "required": true,
                "type": "text",
                "meta": { "pattern": "^[A-Z]{3}$", "minLength": 3, "maxLength": 3 }
            }]
        }]
    }))
    .unwrap();

    let ok = fields(json!({ "General": { "fields": { "Code": { "value": " ABC ", "type": "text" } } } }));
    assert!(validate(&ok, &guide).is_ok());

    let bad = fields(json!({ "General": { "fields": { "Code": { "value": "abc", "type": "text" } } } }));
    assert_eq!(code_of(&bad, &guide), ValidationErrorCode::PatternMismatch);
}

/// A pattern that does not compile never makes it into a loaded guide.
#[test]
fn test_uncompilable_pattern_rejected_at_load() {
    let err = GuideLoader::from_value(json!({
        "groups": [{
            "name": "General",
            "required": true,
            "fields": [{
                "name": "Code",
                "required": true,
                "type": "text",
                "meta": { "pattern": "([A-Z", "minLength": 0, "maxLength": 3 }
            }]
        }]
    }))
    .unwrap_err();
    assert_eq!(err.code(), GuideErrorCode::GuideMalformed);
}

/// Validation gives the same answer every time.
#[test]
fn test_validation_is_deterministic() {
    let guide = rich_guide();
    let doc = field("Stats", "Level", json!(3), "number");
    let first = validate(&doc, &guide).unwrap_err();
    for _ in 0..50 {
        assert_eq!(validate(&doc, &guide).unwrap_err(), first);
    }
}
