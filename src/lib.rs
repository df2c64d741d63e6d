//! charbase - guide-driven character documents
//!
//! Universes define a guide: groups of typed fields with constraints.
//! Characters are validated against their universe's guide, redacted for
//! viewers without privilege, and listed through privilege-scoped,
//! paginated queries.

pub mod access;
pub mod character;
pub mod cli;
pub mod config;
pub mod executor;
pub mod guide;
pub mod observability;
pub mod planner;
pub mod service;
pub mod validator;
