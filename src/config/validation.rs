//! Configuration validation
//!
//! Checks a loaded configuration before any git work starts:
//! - The store root is a non-empty relative path
//! - Every alias points at a Git URL (an SSH one if SSH is required)
//! - The SSH key file exists, when one is configured

use super::profile_config::ProfileConfig;
use crate::WksctlError;
use std::path::Component;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a profile configuration
pub fn validate_config(config: &ProfileConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let store_root = &config.store_root;
    if store_root.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "store_root",
            "Store root cannot be empty",
        ));
    } else if store_root.is_absolute() {
        errors.push(ValidationError::new(
            "store_root",
            format!(
                "Store root must be relative to the repository, got {}",
                store_root.display()
            ),
        ));
    } else if store_root
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        errors.push(ValidationError::new(
            "store_root",
            format!(
                "Store root must stay inside the repository, got {}",
                store_root.display()
            ),
        ));
    }

    for (alias, url) in &config.aliases {
        let field = format!("aliases.{}", alias);
        if alias.is_empty() {
            errors.push(ValidationError::new("aliases", "Alias name cannot be empty"));
        }
        if !gitcmd::is_git_url(url) {
            errors.push(ValidationError::new(
                field,
                format!("Invalid Git URL format: {}", url),
            ));
        } else if config.require_ssh_urls {
            if let Err(e) = gitcmd::validate_ssh_url(url) {
                errors.push(ValidationError::new(field, e.to_string()));
            }
        }
    }

    if let Some(ref key) = config.git.private_ssh_key_path {
        if !key.exists() {
            errors.push(ValidationError::new(
                "git.private_ssh_key_path",
                format!("SSH key not found: {}", key.display()),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate configuration and return a Result
pub fn validate_config_result(config: &ProfileConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        WksctlError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}
