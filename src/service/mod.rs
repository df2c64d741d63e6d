//! Character service flows
//!
//! Create, update, view, delete authorization and listing, with logging.

mod characters;
mod errors;

pub use characters::{CharacterPage, CharacterService};
pub use errors::{ServiceError, ServiceResult};
