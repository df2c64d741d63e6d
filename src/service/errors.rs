//! # Service Errors
//!
//! Error types for character flows.

use thiserror::Error;

use crate::executor::ExecutionError;
use crate::planner::PlannerError;
use crate::validator::ValidationError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    // ==================
    // Client Errors
    // ==================

    /// Character does not conform to its guide
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Update tried to change an identity or timestamp field
    #[error("Field '{field}' cannot be changed")]
    ImmutableFieldChanged { field: &'static str },

    /// Actor's role does not allow the operation
    #[error("Privilege denied: {0}")]
    PrivilegeDenied(String),

    /// List request cannot be planned
    #[error("{0}")]
    Planner(#[from] PlannerError),

    // ==================
    // Server Errors
    // ==================

    /// Query execution failed
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl ServiceError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_)
            | ServiceError::ImmutableFieldChanged { .. }
            | ServiceError::Planner(_) => 400,
            ServiceError::PrivilegeDenied(_) => 403,
            ServiceError::Execution(e) => e.status_code(),
        }
    }

    /// True when the caller caused the error
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::Validation(ValidationError::name_required()).status_code(),
            400
        );
        assert_eq!(
            ServiceError::ImmutableFieldChanged { field: "id" }.status_code(),
            400
        );
        assert_eq!(ServiceError::PrivilegeDenied("no".into()).status_code(), 403);
        assert_eq!(
            ServiceError::Execution(ExecutionError::Backend("down".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(ServiceError::PrivilegeDenied("no".into()).is_client_error());
        assert!(!ServiceError::Execution(ExecutionError::Backend("x".into())).is_client_error());
    }

    #[test]
    fn test_validation_message_surfaces_verbatim() {
        let err = ServiceError::from(ValidationError::field_required("General", "Biography"));
        assert!(err.to_string().contains("Field 'Biography' in group 'General' is required"));
    }
}
