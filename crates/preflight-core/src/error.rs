//! Unified error handling for Preflight Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::LookupError;
use crate::domain::{AggregateError, DomainError};

/// Root error type for Preflight Core operations.
#[derive(Debug, Error, Clone)]
pub enum PreflightError {
    /// Errors from the domain layer (malformed values, missing fragments).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A cloud lookup failed outside of a validation pass.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// The install config failed one or more checks.
    ///
    /// Displays exactly as the aggregated report, one defect per line.
    #[error(transparent)]
    Validation(#[from] AggregateError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PreflightError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Lookup(e) => e.suggestions(),
            Self::Validation(report) => vec![
                format!("{} problem(s) found in the install config", report.len()),
                "Fix the fields listed above and run the validation again".into(),
            ],
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in preflight".into(),
                "Please report this issue at: https://github.com/cosecruz/preflight/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Lookup(e) => e.category(),
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Lookup(LookupError::Timeout(_) | LookupError::Transport { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PreflightResult<T> = Result<T, PreflightError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> PreflightResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> PreflightResult<T> {
        self.map_err(|e| PreflightError::Configuration {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
