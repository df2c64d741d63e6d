//! Character document model
//!
//! Characters hold field values organised the way their universe's guide
//! organises fields. A character has no meaning without its guide; see
//! [`crate::validator`] for the checks that tie the two together.

mod codec;
mod types;

pub use types::{
    Character, CharacterDraft, CharacterField, CharacterFields, CharacterGroup, CharacterMeta,
    CharacterName, CharacterReference, FieldValue, OptionsValue,
};
