//! Redaction Invariant Tests
//!
//! Tests for hidden content handling:
//! - Owners and privileged roles see everything
//! - Other members never see hidden groups, hidden values or hidden names
//! - Redaction only removes information, never adds or alters it
//! - The stored value is never touched

use charbase::access::{AccessContext, Redactor, Role};
use charbase::character::{Character, CharacterFields, CharacterMeta, CharacterName};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn character(owner: Uuid, name_hidden: bool) -> Character {
    let fields = CharacterFields::from_json(json!({
        "groups": {
            "General": {
                "fields": {
                    "Biography": { "value": "Grew up in the Shire", "type": "text" },
                    "Secret": { "value": "Carries the ring", "type": "text", "hidden": true }
                }
            },
            "Private": {
                "hidden": true,
                "fields": {
                    "Fears": { "value": ["spiders", "Nazgul"], "type": "list" }
                }
            }
        }
    }))
    .unwrap();

    let now = Utc::now();
    Character {
        id: Uuid::new_v4(),
        universe_id: Uuid::new_v4(),
        owner_id: owner,
        name: "Frodo Baggins".into(),
        tag: "hobbit".into(),
        fields,
        meta: CharacterMeta {
            hidden: false,
            name_hidden,
            name: CharacterName::new("Frodo", "Baggins", ""),
        },
        created_at: now,
        updated_at: now,
    }
}

/// Every `(group, field, value)` triple visible in a character
fn visible_values(c: &Character) -> Vec<(String, String, serde_json::Value)> {
    let json = c.fields.to_json();
    let mut out = Vec::new();
    for (group, body) in json["groups"].as_object().unwrap() {
        for (field, raw) in body["fields"].as_object().unwrap() {
            if !raw["value"].is_null() {
                out.push((group.clone(), field.clone(), raw["value"].clone()));
            }
        }
    }
    out
}

// =============================================================================
// Bypass Tests
// =============================================================================

/// The owner sees the character unchanged.
#[test]
fn test_owner_sees_everything() {
    let owner = Uuid::new_v4();
    let c = character(owner, true);
    assert_eq!(Redactor::view(&c, &AccessContext::member(owner)), c);
}

/// Admins and owners of the universe see everything.
#[test]
fn test_privileged_roles_see_everything() {
    let c = character(Uuid::new_v4(), true);
    for role in [Role::Admin, Role::Owner] {
        let ctx = AccessContext::new(Uuid::new_v4(), role);
        assert_eq!(Redactor::view(&c, &ctx), c);
    }
}

// =============================================================================
// Member View Tests
// =============================================================================

/// Hidden groups come back empty, hidden values come back null, open
/// values are untouched.
#[test]
fn test_member_view_withholds_hidden_content() {
    let c = character(Uuid::new_v4(), false);
    let view = Redactor::view(&c, &AccessContext::member(Uuid::new_v4()));

    let general = view.fields.groups.get("General").unwrap();
    assert!(general.fields.get("Biography").unwrap().value.is_some());

    let secret = general.fields.get("Secret").unwrap();
    assert!(secret.value.is_none());
    assert!(secret.hidden);

    let private = view.fields.groups.get("Private").unwrap();
    assert!(private.hidden);
    assert!(private.fields.is_empty());

    assert_eq!(view.name, "Frodo Baggins");
}

/// A hidden name is cleared along with its parts.
#[test]
fn test_member_view_withholds_hidden_name() {
    let c = character(Uuid::new_v4(), true);
    let view = Redactor::view(&c, &AccessContext::member(Uuid::new_v4()));

    assert!(view.name.is_empty());
    assert_eq!(view.meta.name, CharacterName::default());
    assert!(view.meta.name_hidden);
    assert_eq!(view.id, c.id);
    assert_eq!(view.tag, c.tag);
}

/// Redacting leaves the original intact.
#[test]
fn test_stored_character_untouched() {
    let c = character(Uuid::new_v4(), true);
    let before = c.clone();
    let _ = Redactor::view(&c, &AccessContext::member(Uuid::new_v4()));
    assert_eq!(c, before);
}

// =============================================================================
// Monotonicity Tests
// =============================================================================

/// Every value the member sees is one the owner sees, with the same content.
#[test]
fn test_redaction_is_monotone() {
    let owner = Uuid::new_v4();
    let c = character(owner, false);

    let full = visible_values(&Redactor::view(&c, &AccessContext::member(owner)));
    let narrowed = visible_values(&Redactor::view(&c, &AccessContext::member(Uuid::new_v4())));

    assert!(narrowed.len() < full.len());
    for value in &narrowed {
        assert!(full.contains(value), "{:?} not in owner view", value);
    }
}

/// Redacting an already redacted view changes nothing.
#[test]
fn test_redaction_is_idempotent() {
    let c = character(Uuid::new_v4(), true);
    let ctx = AccessContext::member(Uuid::new_v4());
    let once = Redactor::view(&c, &ctx);
    assert_eq!(Redactor::view(&once, &ctx), once);
}

// =============================================================================
// Reference Tests
// =============================================================================

/// List references drop hidden names for other members only.
#[test]
fn test_reference_name_redaction() {
    let owner = Uuid::new_v4();
    let reference = character(owner, true).reference();

    let member_view = Redactor::view(&reference, &AccessContext::member(Uuid::new_v4()));
    assert!(member_view.name.is_empty());
    assert!(member_view.name_parts.is_none());

    let owner_view = Redactor::view(&reference, &AccessContext::member(owner));
    assert_eq!(owner_view.name, "Frodo Baggins");
    assert_eq!(owner_view.last_name(), "Baggins");
}

/// Visible names pass through.
#[test]
fn test_reference_visible_name_kept() {
    let reference = character(Uuid::new_v4(), false).reference();
    let views = Redactor::view_all(&[reference.clone()], &AccessContext::member(Uuid::new_v4()));
    assert_eq!(views, vec![reference]);
}
