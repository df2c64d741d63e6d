//! Redaction of hidden content
//!
//! Redaction never fails and never touches the stored value: it builds a
//! narrowed copy for viewers who are neither privileged nor the owner.

use uuid::Uuid;

use super::role::AccessContext;
use crate::character::{Character, CharacterFields, CharacterReference};
use crate::observability::{log_event_with_fields, Event};

/// Something that can be shown with hidden content withheld
pub trait Redactable: Clone {
    /// Owner whose content this is
    fn owner_id(&self) -> Uuid;

    /// Returns a copy with hidden content cleared and whether anything
    /// was withheld
    fn redacted(&self) -> (Self, bool);
}

impl Redactable for Character {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn redacted(&self) -> (Self, bool) {
        let mut view = self.clone();
        let mut narrowed = false;

        if view.meta.name_hidden {
            narrowed |= !view.name.is_empty() || view.meta.name != Default::default();
            view.name.clear();
            view.meta.name = Default::default();
        }

        narrowed |= redact_fields(&mut view.fields);
        (view, narrowed)
    }
}

impl Redactable for CharacterReference {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn redacted(&self) -> (Self, bool) {
        let mut view = self.clone();
        if !view.name_hidden {
            return (view, false);
        }
        let narrowed = !view.name.is_empty() || view.name_parts.is_some();
        view.name.clear();
        view.name_parts = None;
        (view, narrowed)
    }
}

/// Clears hidden groups and hidden field values; type and flags stay
fn redact_fields(fields: &mut CharacterFields) -> bool {
    let mut narrowed = false;
    for group in fields.groups.values_mut() {
        if group.hidden {
            narrowed |= !group.fields.is_empty();
            group.fields.clear();
            continue;
        }
        for field in group.fields.values_mut().filter(|f| f.hidden) {
            narrowed |= field.value.take().is_some();
        }
    }
    narrowed
}

/// Produces the view of characters a given actor is allowed to see
pub struct Redactor;

impl Redactor {
    /// Returns `item` as `ctx` may see it
    pub fn view<T: Redactable>(item: &T, ctx: &AccessContext) -> T {
        let owner_id = item.owner_id();
        if ctx.bypasses_redaction(owner_id) {
            return item.clone();
        }

        let (view, narrowed) = item.redacted();
        if narrowed {
            let viewer = ctx.user_id.to_string();
            let owner = owner_id.to_string();
            log_event_with_fields(
                Event::CharacterRedacted,
                &[("viewer", &viewer), ("owner", &owner)],
            );
        }
        view
    }

    /// Redacts every item for the same viewer
    pub fn view_all<T: Redactable>(items: &[T], ctx: &AccessContext) -> Vec<T> {
        items.iter().map(|item| Self::view(item, ctx)).collect()
    }
}
