//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{DEFAULT_API_URL, DEFAULT_CHANGELOG_STRUCTURE, DEFAULT_HEAD_REF, MANIFEST_FILE};
use crate::types::RepoRef;

/// Everything a tagging run needs, resolved before the run starts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Where the manifest lives and how its version is read
    pub manifest: ManifestConfig,

    /// Tag name decoration
    pub naming: NamingConfig,

    /// Changelog composition
    pub changelog: ChangelogConfig,

    /// Hosting service access
    pub github: GitHubConfig,

    /// Explicit tag message; empty means compose one
    pub tag_message: String,

    /// Skip the create calls
    pub dry_run: bool,
}

/// Manifest location and version handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Checked-out workspace directory
    pub workspace: PathBuf,

    /// Package directory relative to the workspace
    pub package_root: PathBuf,

    /// Keep the `+build` suffix of the version
    pub include_build_number: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            package_root: PathBuf::new(),
            include_build_number: true,
        }
    }
}

impl ManifestConfig {
    /// Directory holding the manifest
    pub fn package_dir(&self) -> PathBuf {
        self.workspace.join(&self.package_root)
    }

    /// Full path of the manifest file
    pub fn manifest_path(&self) -> PathBuf {
        self.package_dir().join(MANIFEST_FILE)
    }
}

/// Tag name decoration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Prepended to the version
    pub prefix: String,

    /// Appended to the version
    pub suffix: String,
}

impl NamingConfig {
    /// Tag name for a version
    pub fn tag_name(&self, version: &str) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }
}

/// Changelog composition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Per-commit template
    pub structure: String,

    /// Branch the compared range ends at
    pub head_ref: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            structure: DEFAULT_CHANGELOG_STRUCTURE.to_string(),
            head_ref: DEFAULT_HEAD_REF.to_string(),
        }
    }
}

/// Hosting service access
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API root
    pub api_url: String,

    /// API token
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Target repository
    pub repository: Option<RepoRef>,

    /// Commit the new tag points at
    pub sha: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            repository: None,
            sha: None,
        }
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("repository", &self.repository)
            .field("sha", &self.sha)
            .finish()
    }
}
