//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{GitHubConfig, TagConfig};

/// Validate configuration for a tagging run
pub fn validate_config(config: &TagConfig) -> Result<()> {
    debug!("validating configuration");
    validate_api_access(&config.github)?;
    if !config.dry_run {
        validate_target_commit(&config.github)?;
    }
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Validate the inputs needed to talk to the hosting service
pub fn validate_api_access(github: &GitHubConfig) -> Result<()> {
    if github.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
        return Err(ConfigError::MissingField("GITHUB_TOKEN".to_string()).into());
    }

    if github.repository.is_none() {
        return Err(ConfigError::MissingField("repository (GITHUB_REPOSITORY)".to_string()).into());
    }

    if !github.api_url.starts_with("http://") && !github.api_url.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            field: "api_url".to_string(),
            message: format!("'{}' is not an http(s) URL", github.api_url),
        }
        .into());
    }

    Ok(())
}

fn validate_target_commit(github: &GitHubConfig) -> Result<()> {
    if github.sha.as_deref().map_or(true, |s| s.trim().is_empty()) {
        return Err(ConfigError::MissingField("commit sha (GITHUB_SHA)".to_string()).into());
    }
    Ok(())
}

fn validate_changelog(config: &TagConfig) -> Result<()> {
    if config.changelog.structure.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog_structure".to_string(),
            message: "template cannot be empty".to_string(),
        }
        .into());
    }

    if config.changelog.head_ref.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "head_ref".to_string(),
            message: "head ref cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}
