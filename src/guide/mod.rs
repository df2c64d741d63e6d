//! Guide subsystem
//!
//! A guide is the per-universe schema characters are checked against:
//! named groups of typed fields, each with constraints matching its type.
//!
//! # Design Principles
//!
//! - Closed set of field types
//! - Constraint shape fixed by the field type
//! - Guides are structurally validated when loaded
//! - Defaults are an explicit value, never a global

mod errors;
mod loader;
mod structure;
mod types;
mod universe;

pub use errors::{GuideError, GuideErrorCode, GuideResult};
pub use loader::GuideLoader;
pub use types::{
    DescriptionMeta, FieldConstraints, FieldType, Guide, GuideField, GuideGroup, ListMeta,
    NumberMeta, OptionsMeta, ProgressBarColor, ProgressMeta, TextMeta, TextPattern,
};
pub use universe::{GuideDefaults, Universe, UniverseSettings};
