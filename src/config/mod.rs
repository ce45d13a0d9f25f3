//! Configuration system
//!
//! Loads ~/.config/wksctl/config.yaml with support for:
//! - The profiles store root inside the cluster repository
//! - Repository aliases (e.g. `app-dev`)
//! - Commit identity and SSH key for git
//! - An SSH-only policy for profile repositories

mod profile_config;
pub mod validation;

pub use profile_config::{
    GitConfig, ProfileConfig, APP_DEV_ALIAS, APP_DEV_REPO_URL, DEFAULT_STORE_ROOT,
};
pub use validation::{validate_config, validate_config_result, ValidationError};
