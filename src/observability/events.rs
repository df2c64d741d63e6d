//! Observable events
//!
//! Events are explicit and typed. Each maps to a stable uppercase name
//! and a default severity.

use std::fmt;

use super::Severity;

/// Observable events in charbase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,
    /// Guide loaded from disk
    GuideLoaded,

    // Characters
    /// Character fields validated and normalized
    CharacterValidated,
    /// Character rejected by the validator
    ValidationRejected,
    /// Character content withheld from a viewer
    CharacterRedacted,

    // Queries
    /// List query planned
    QueryPlanned,
    /// List query executed
    QueryExecuted,
    /// Query execution failed
    QueryFailed,

    // Access
    /// Operation refused for insufficient privilege
    PrivilegeDenied,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::GuideLoaded => "GUIDE_LOADED",

            Event::CharacterValidated => "CHARACTER_VALIDATED",
            Event::ValidationRejected => "CHARACTER_REJECTED",
            Event::CharacterRedacted => "CHARACTER_REDACTED",

            Event::QueryPlanned => "QUERY_PLANNED",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryFailed => "QUERY_FAILED",

            Event::PrivilegeDenied => "PRIVILEGE_DENIED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::CharacterRedacted | Event::QueryPlanned => Severity::Trace,
            Event::ValidationRejected | Event::PrivilegeDenied => Severity::Warn,
            Event::QueryFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
