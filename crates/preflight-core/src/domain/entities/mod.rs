pub mod cloud;
pub mod install_config;
pub mod metadata;

pub use cloud::*;
pub use install_config::*;
pub use metadata::ClusterMetadata;
