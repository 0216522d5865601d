//! Preflight Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for cross-validating
//! a cluster install config against the IBM Cloud control plane, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          preflight-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (ValidationService)            │
//! │   Platform / Machine Pool / Atomic      │
//! │              validators                 │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (Driven: CloudApi)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    preflight-adapters (Infrastructure)  │
//! │      (MemoryCloud, snapshot loader)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (InstallConfig, FieldErrors, Regions)   │
//! │         No I/O, no lookups              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use preflight_core::prelude::*;
//!
//! # fn run(cloud: Box<dyn CloudApi>, config: InstallConfig) {
//! let service = ValidationService::new(cloud, RegionCatalog::ibm_vpc_default());
//! match service.validate(&config) {
//!     Ok(()) => println!("install config is valid"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancellationFlag, LookupContext, LookupError, LookupResult, ValidationService,
        ports::CloudApi,
    };
    pub use crate::domain::{
        AggregateError, ClusterMetadata, Crn, FieldError, FieldErrorKind, FieldErrors, FieldPath,
        IbmCloudMachinePool, IbmCloudPlatform, InstallConfig, MachinePool, RegionCatalog,
    };
    pub use crate::error::{PreflightError, PreflightResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
