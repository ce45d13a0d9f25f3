//! wksctl - profile management for cluster repositories
//!
//! Profiles are reusable configuration bundles published as Git
//! repositories. Enabling a profile copies it into the cluster repository
//! under `profiles/<host>/<repo path>` and (by default) commits and pushes the
//! change; disabling removes it again.
//!
//! # Architecture
//!
//! - **profile**: enable/disable operations and storage locations
//! - **config**: configuration file, aliases and validation
//! - **logging**: tracing subscriber setup
//! - **style**: terminal output styling
//!
//! Git itself is driven through the `gitcmd` crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod profile;
pub mod style;

// Re-exports
pub use error::{Result, WksctlError};
