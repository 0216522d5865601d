//! Application services - orchestrate use cases.
//!
//! Services tie the validators to a `CloudApi` and a region catalog and
//! turn the accumulated field errors into one result.

pub mod validation_service;

pub use validation_service::ValidationService;
