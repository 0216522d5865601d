// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Preflight.
//!
//! This module contains pure logic with no I/O. All cloud lookups are
//! handled via the `CloudApi` port defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: Install configs are read, never mutated
//! - **Accumulated errors**: Checks report into `FieldErrors`, never bail
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod field;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    BootVolume, ClusterMetadata, CustomImage, DnsInstance, DnsZone, EncryptionKey,
    IbmCloudMachinePool, IbmCloudPlatform, InstallConfig, InstanceProfile, MachinePool,
    MachinePoolPlatform, ObjectMeta, Platform, ResourceGroup, Subnet, Vpc,
};

pub use error::DomainError;

pub use field::{AggregateError, FieldError, FieldErrorKind, FieldErrors, FieldPath};

pub use value_objects::{Crn, RegionCatalog};

pub use validation::DomainValidator;
