//! Guide error types
//!
//! Error codes:
//! - CHAR_GUIDE_UNREADABLE (FATAL)
//! - CHAR_GUIDE_MALFORMED (REJECT)
//! - CHAR_GUIDE_INVALID_STRUCTURE (REJECT)

use std::fmt;

use super::types::FieldType;

/// Severity levels for guide errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Guide rejected, caller may fix and retry
    Reject,
    /// Startup cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideErrorCode {
    /// Guide file could not be read
    GuideUnreadable,
    /// Guide JSON does not decode
    GuideMalformed,
    /// Guide decodes but breaks a structural rule
    GuideInvalidStructure,
}

impl GuideErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            GuideErrorCode::GuideUnreadable => "CHAR_GUIDE_UNREADABLE",
            GuideErrorCode::GuideMalformed => "CHAR_GUIDE_MALFORMED",
            GuideErrorCode::GuideInvalidStructure => "CHAR_GUIDE_INVALID_STRUCTURE",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            GuideErrorCode::GuideUnreadable => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for GuideErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Guide error with the offending group/field when known
#[derive(Debug, Clone)]
pub struct GuideError {
    code: GuideErrorCode,
    message: String,
    group: Option<String>,
    field: Option<String>,
}

impl GuideError {
    /// The guide file could not be read
    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: GuideErrorCode::GuideUnreadable,
            message: format!("Failed to read guide '{}': {}", path.into(), reason.into()),
            group: None,
            field: None,
        }
    }

    /// The guide JSON does not decode
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            code: GuideErrorCode::GuideMalformed,
            message: format!("Malformed guide: {}", reason.into()),
            group: None,
            field: None,
        }
    }

    /// A field's `meta` does not decode for its type
    pub fn malformed_meta(field: &str, field_type: FieldType, reason: impl Into<String>) -> Self {
        Self {
            code: GuideErrorCode::GuideMalformed,
            message: format!(
                "Field '{}' has meta that does not fit type '{}': {}",
                field,
                field_type,
                reason.into()
            ),
            group: None,
            field: Some(field.to_string()),
        }
    }

    /// A group-level structural rule is broken
    pub fn invalid_group(group: &str, reason: impl Into<String>) -> Self {
        Self {
            code: GuideErrorCode::GuideInvalidStructure,
            message: format!("Group '{}' {}", group, reason.into()),
            group: Some(group.to_string()),
            field: None,
        }
    }

    /// A field-level structural rule is broken
    pub fn invalid_field(group: &str, field: &str, reason: impl Into<String>) -> Self {
        Self {
            code: GuideErrorCode::GuideInvalidStructure,
            message: format!("Field '{}' in group '{}' {}", field, group, reason.into()),
            group: Some(group.to_string()),
            field: Some(field.to_string()),
        }
    }

    pub fn code(&self) -> GuideErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for GuideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for GuideError {}

pub type GuideResult<T> = Result<T, GuideError>;
