//! Validation error types
//!
//! Every code here is a schema violation: client-caused, detected from the
//! inputs alone, never retried, and surfaced verbatim.
//!
//! Error codes:
//! - CHAR_GROUP_REQUIRED
//! - CHAR_FIELD_REQUIRED
//! - CHAR_NAME_REQUIRED
//! - CHAR_TYPE_MISMATCH
//! - CHAR_RANGE_VIOLATION
//! - CHAR_PATTERN_MISMATCH
//! - CHAR_MEMBERSHIP_VIOLATION
//! - CHAR_COUNT_VIOLATION
//! - CHAR_UNDOCUMENTED_GROUP
//! - CHAR_UNDOCUMENTED_FIELD
//! - CHAR_MALFORMED_DOCUMENT

use std::fmt;

/// Severity levels for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Required guide group missing from the character
    GroupRequired,
    /// Required guide field missing from its group
    FieldRequired,
    /// Character name empty
    NameRequired,
    /// Field type or value shape differs from the guide
    TypeMismatch,
    /// Length, numeric range or tick violated
    RangeViolation,
    /// Text does not match the field pattern
    PatternMismatch,
    /// Option not in the allowed set
    MembershipViolation,
    /// List element count out of range
    CountViolation,
    /// Character group absent from the guide
    UndocumentedGroup,
    /// Character field absent from its guide group
    UndocumentedField,
    /// Character JSON does not decode at all
    MalformedDocument,
}

impl ValidationErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::GroupRequired => "CHAR_GROUP_REQUIRED",
            ValidationErrorCode::FieldRequired => "CHAR_FIELD_REQUIRED",
            ValidationErrorCode::NameRequired => "CHAR_NAME_REQUIRED",
            ValidationErrorCode::TypeMismatch => "CHAR_TYPE_MISMATCH",
            ValidationErrorCode::RangeViolation => "CHAR_RANGE_VIOLATION",
            ValidationErrorCode::PatternMismatch => "CHAR_PATTERN_MISMATCH",
            ValidationErrorCode::MembershipViolation => "CHAR_MEMBERSHIP_VIOLATION",
            ValidationErrorCode::CountViolation => "CHAR_COUNT_VIOLATION",
            ValidationErrorCode::UndocumentedGroup => "CHAR_UNDOCUMENTED_GROUP",
            ValidationErrorCode::UndocumentedField => "CHAR_UNDOCUMENTED_FIELD",
            ValidationErrorCode::MalformedDocument => "CHAR_MALFORMED_DOCUMENT",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure naming the offending group and field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    code: ValidationErrorCode,
    message: String,
    group: Option<String>,
    field: Option<String>,
}

impl ValidationError {
    fn at_field(code: ValidationErrorCode, group: &str, field: &str, reason: impl fmt::Display) -> Self {
        Self {
            code,
            message: format!("Field '{}' in group '{}' {}", field, group, reason),
            group: Some(group.to_string()),
            field: Some(field.to_string()),
        }
    }

    pub fn group_required(group: &str) -> Self {
        Self {
            code: ValidationErrorCode::GroupRequired,
            message: format!("Group '{}' is required", group),
            group: Some(group.to_string()),
            field: None,
        }
    }

    pub fn field_required(group: &str, field: &str) -> Self {
        Self::at_field(ValidationErrorCode::FieldRequired, group, field, "is required")
    }

    pub fn name_required() -> Self {
        Self {
            code: ValidationErrorCode::NameRequired,
            message: "Character name is required".into(),
            group: None,
            field: None,
        }
    }

    /// Value shape differs from what the field type needs
    pub fn type_mismatch(group: &str, field: &str, expected: &str) -> Self {
        Self::at_field(
            ValidationErrorCode::TypeMismatch,
            group,
            field,
            format_args!("must be {}", expected),
        )
    }

    /// Declared field type differs from the guide's
    pub fn wrong_type(group: &str, field: &str, expected: impl fmt::Display) -> Self {
        Self::at_field(
            ValidationErrorCode::TypeMismatch,
            group,
            field,
            format_args!("must specify type '{}'", expected),
        )
    }

    pub fn range(group: &str, field: &str, reason: impl fmt::Display) -> Self {
        Self::at_field(ValidationErrorCode::RangeViolation, group, field, reason)
    }

    pub fn pattern_mismatch(group: &str, field: &str, pattern: &str) -> Self {
        Self::at_field(
            ValidationErrorCode::PatternMismatch,
            group,
            field,
            format_args!("must match pattern {}", pattern),
        )
    }

    pub fn membership(group: &str, field: &str, allowed: &[String]) -> Self {
        Self::at_field(
            ValidationErrorCode::MembershipViolation,
            group,
            field,
            format_args!("must be one of [{}]", allowed.join(", ")),
        )
    }

    pub fn count(group: &str, field: &str, min: usize, max: usize) -> Self {
        Self::at_field(
            ValidationErrorCode::CountViolation,
            group,
            field,
            format_args!("must contain between {} and {} elements", min, max),
        )
    }

    pub fn undocumented_group(group: &str) -> Self {
        Self {
            code: ValidationErrorCode::UndocumentedGroup,
            message: format!("Guide does not document provided group '{}'", group),
            group: Some(group.to_string()),
            field: None,
        }
    }

    pub fn undocumented_field(group: &str, field: &str) -> Self {
        Self {
            code: ValidationErrorCode::UndocumentedField,
            message: format!(
                "Guide does not document provided field '{}' in group '{}'",
                field, group
            ),
            group: Some(group.to_string()),
            field: Some(field.to_string()),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::MalformedDocument,
            message: format!("Malformed character fields: {}", reason.into()),
            group: None,
            field: None,
        }
    }

    pub fn code(&self) -> ValidationErrorCode {
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
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ValidationErrorCode::GroupRequired.code(), "CHAR_GROUP_REQUIRED");
        assert_eq!(ValidationErrorCode::UndocumentedField.code(), "CHAR_UNDOCUMENTED_FIELD");
        assert_eq!(ValidationErrorCode::CountViolation.severity(), Severity::Reject);
    }

    #[test]
    fn test_field_required_message() {
        let err = ValidationError::field_required("General", "Biography");
        assert_eq!(err.message(), "Field 'Biography' in group 'General' is required");
        assert_eq!(err.group(), Some("General"));
        assert_eq!(err.field(), Some("Biography"));
    }

    #[test]
    fn test_display_includes_code_and_severity() {
        let err = ValidationError::undocumented_group("Secrets");
        let display = err.to_string();
        assert!(display.starts_with("[REJECT] CHAR_UNDOCUMENTED_GROUP"));
        assert!(display.contains("Secrets"));
    }

    #[test]
    fn test_membership_lists_allowed_values() {
        let err = ValidationError::membership("Looks", "Eyes", &["red".into(), "blue".into()]);
        assert!(err.message().contains("[red, blue]"));
    }
}
