//! Access control and redaction
//!
//! Roles decide who may bypass redaction; the [`Redactor`] narrows what
//! everybody else sees. Redaction only removes content, it never denies an
//! operation; that decision belongs to the service layer.

mod redactor;
mod role;

pub use redactor::{Redactable, Redactor};
pub use role::{AccessContext, Role};
