//! Character validation against a universe guide
//!
//! # Design Principles
//!
//! - Closed world: undocumented groups and fields are rejected
//! - Pure: input is never mutated, a normalized copy is returned
//! - Deterministic: guide order for required checks, first failure wins
//! - All-or-nothing: no partially validated output

mod checks;
mod errors;
mod validator;

pub use errors::{Severity, ValidationError, ValidationErrorCode, ValidationResult};
pub use validator::{validate, CharacterValidator};
