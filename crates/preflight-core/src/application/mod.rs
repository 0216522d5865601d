//! Application layer for Preflight.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ValidationService)
//! - **Validators**: The cross-checks run against the cloud
//! - **Ports**: Interface definitions (traits) for the cloud lookups
//! - **Context**: Per-run cancellation and timeout
//! - **Errors**: Lookup failures as seen by the validators
//!
//! Static rules live in `crate::domain`; everything here needs a `CloudApi`.

pub mod context;
pub mod error;
pub mod ports;
pub mod services;
pub mod validators;

// Re-export main services
pub use services::ValidationService;

// Re-export port traits (for adapter implementation)
pub use ports::CloudApi;

pub use context::{CancellationFlag, DEFAULT_LOOKUP_TIMEOUT, LookupContext};
pub use error::{LookupError, LookupResult};
