// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// Raised when a value cannot even be interpreted, as opposed to a value that
/// is well-formed but fails a check (those become `FieldError`s).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("'{crn}' is not a valid IBM CRN: {reason}")]
    InvalidCrn { crn: String, reason: String },

    #[error("unknown region '{region}'")]
    UnknownRegion { region: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("install config has no '{platform}' platform section")]
    MissingPlatform { platform: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidCrn { crn, .. } => vec![
                format!("Check the CRN: {}", crn),
                "A CRN has ten ':'-separated segments and starts with 'crn:v1:'".into(),
                "Copy it from the CIS instance details page".into(),
            ],
            Self::UnknownRegion { region } => vec![
                format!("'{}' is not a known region", region),
                "Try: preflight regions".into(),
            ],
            Self::MissingPlatform { platform } => vec![
                format!("Add a 'platform.{}' section to the install config", platform),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCrn { .. } => ErrorCategory::Validation,
            Self::UnknownRegion { .. } => ErrorCategory::NotFound,
            Self::MissingPlatform { .. } => ErrorCategory::Configuration,
        }
    }
}
