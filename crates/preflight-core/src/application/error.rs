//! Errors returned by the cloud lookup port.
//!
//! The port keeps "the named resource does not exist" apart from "the lookup
//! itself failed", and validators classify on the variant, never on message
//! text.

use std::time::Duration;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Failure of a single cloud lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The lookup succeeded and the resource does not exist.
    #[error("{resource} not found: \"{id}\"")]
    NotFound { resource: &'static str, id: String },

    /// The run was cancelled before or during the lookup.
    #[error("lookup cancelled")]
    Cancelled,

    /// The lookup overran its deadline.
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    /// Transport, auth or decoding failure reported by the adapter.
    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
}

/// Result of a cloud lookup.
pub type LookupResult<T> = Result<T, LookupError>;

impl LookupError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Cancelled or timed out: the answer is unknown, not negative.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Timeout(_))
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { resource, id } => vec![
                format!("No {} named '{}' exists in this account", resource, id),
                "Check the account and region you are logged in to".into(),
            ],
            Self::Cancelled => vec!["The run was cancelled; no result is available".into()],
            Self::Timeout(limit) => vec![
                format!("The cloud API did not answer within {:?}", limit),
                "Try again, or raise lookup.timeout_secs in the config".into(),
            ],
            Self::Transport { .. } => vec![
                "Check network connectivity and credentials".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Cancelled | Self::Timeout(_) | Self::Transport { .. } => ErrorCategory::Internal,
        }
    }
}
