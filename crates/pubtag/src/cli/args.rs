//! Step inputs shared by the commands
//!
//! Every input can come from a flag or from the environment variable the
//! Actions runner sets for it. An empty value counts as unset.

use std::path::PathBuf;

use clap::Args;

use pubtag_core::config::{
    parse_bool_input, ChangelogConfig, GitHubConfig, ManifestConfig, NamingConfig,
    DEFAULT_API_URL, DEFAULT_CHANGELOG_STRUCTURE, DEFAULT_HEAD_REF,
};
use pubtag_core::{RepoRef, Result};

/// Treat empty strings as absent
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Where the manifest lives
#[derive(Debug, Clone, Args)]
pub struct ManifestArgs {
    /// Checked-out workspace directory
    #[arg(long, env = "GITHUB_WORKSPACE", value_name = "DIR")]
    pub workspace: Option<String>,

    /// Package directory relative to the workspace
    #[arg(long, env = "INPUT_PACKAGE_ROOT", value_name = "DIR")]
    pub package_root: Option<String>,

    /// Keep the +build suffix of the version (true | false)
    #[arg(long, env = "INPUT_INCLUDE_BUILD_NUMBER", value_name = "BOOL")]
    pub include_build_number: Option<String>,
}

impl ManifestArgs {
    pub fn to_config(&self) -> Result<ManifestConfig> {
        let include_build_number = parse_bool_input(
            "include_build_number",
            self.include_build_number.as_deref().unwrap_or_default(),
            true,
        )?;

        Ok(ManifestConfig {
            workspace: PathBuf::from(non_empty(&self.workspace).unwrap_or(".")),
            package_root: non_empty(&self.package_root)
                .map(PathBuf::from)
                .unwrap_or_default(),
            include_build_number,
        })
    }
}

/// Tag name decoration
#[derive(Debug, Clone, Args)]
pub struct NamingArgs {
    /// Text placed before the version in the tag name
    #[arg(long, env = "INPUT_TAG_PREFIX", value_name = "TEXT")]
    pub tag_prefix: Option<String>,

    /// Text placed after the version in the tag name
    #[arg(long, env = "INPUT_TAG_SUFFIX", value_name = "TEXT")]
    pub tag_suffix: Option<String>,
}

impl NamingArgs {
    pub fn to_config(&self) -> NamingConfig {
        NamingConfig {
            prefix: self.tag_prefix.clone().unwrap_or_default(),
            suffix: self.tag_suffix.clone().unwrap_or_default(),
        }
    }
}

/// Tag message inputs
#[derive(Debug, Clone, Args)]
pub struct ChangelogArgs {
    /// Per-commit template ({{message}}, {{messageHeadline}}, {{author}}, {{sha}})
    #[arg(long, env = "INPUT_CHANGELOG_STRUCTURE", value_name = "TEMPLATE")]
    pub changelog_structure: Option<String>,

    /// Explicit tag message; skips changelog generation
    #[arg(long, env = "INPUT_TAG_MESSAGE", value_name = "TEXT")]
    pub tag_message: Option<String>,

    /// Branch the changelog range ends at
    #[arg(long, env = "INPUT_HEAD_REF", value_name = "REF")]
    pub head_ref: Option<String>,
}

impl ChangelogArgs {
    pub fn to_config(&self) -> ChangelogConfig {
        ChangelogConfig {
            structure: non_empty(&self.changelog_structure)
                .unwrap_or(DEFAULT_CHANGELOG_STRUCTURE)
                .to_string(),
            head_ref: non_empty(&self.head_ref)
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_HEAD_REF)
                .to_string(),
        }
    }

    pub fn tag_message(&self) -> String {
        self.tag_message.clone().unwrap_or_default()
    }
}

/// Hosting service access
#[derive(Debug, Clone, Args)]
pub struct GitHubArgs {
    /// API token (falls back to GITHUB_TOKEN)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Target repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/REPO")]
    pub repository: Option<String>,

    /// REST API root
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Commit the new tag points at
    #[arg(long, env = "GITHUB_SHA", value_name = "SHA")]
    pub sha: Option<String>,
}

impl GitHubArgs {
    pub fn to_config(&self) -> Result<GitHubConfig> {
        let repository = match non_empty(&self.repository) {
            Some(value) => Some(value.parse::<RepoRef>()?),
            None => None,
        };

        Ok(GitHubConfig {
            api_url: non_empty(&self.api_url)
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            token: resolve_token(
                self.token.clone(),
                std::env::var("GITHUB_TOKEN").ok(),
            ),
            repository,
            sha: non_empty(&self.sha).map(|s| s.trim().to_string()),
        })
    }
}

/// Pick the explicit token, else the ambient one
fn resolve_token(explicit: Option<String>, ambient: Option<String>) -> Option<String> {
    explicit
        .filter(|t| !t.trim().is_empty())
        .or_else(|| ambient.filter(|t| !t.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        manifest: ManifestArgs,
        #[command(flatten)]
        naming: NamingArgs,
        #[command(flatten)]
        changelog: ChangelogArgs,
        #[command(flatten)]
        github: GitHubArgs,
    }

    fn parse(args: &[&str]) -> Harness {
        Harness::try_parse_from(std::iter::once("harness").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_manifest_args() {
        let harness = parse(&[
            "--workspace",
            "/work",
            "--package-root",
            "packages/app",
            "--include-build-number",
            "False",
        ]);
        let config = harness.manifest.to_config().unwrap();
        assert_eq!(config.workspace, PathBuf::from("/work"));
        assert_eq!(config.package_root, PathBuf::from("packages/app"));
        assert!(!config.include_build_number);
    }

    #[test]
    fn test_include_build_number_rejects_garbage() {
        let harness = parse(&["--include-build-number", "maybe"]);
        assert!(harness.manifest.to_config().is_err());
    }

    #[test]
    fn test_empty_inputs_use_defaults() {
        let harness = parse(&[
            "--workspace",
            "",
            "--package-root",
            "",
            "--include-build-number",
            "",
            "--changelog-structure",
            "",
            "--head-ref",
            "",
            "--api-url",
            "",
        ]);
        let manifest = harness.manifest.to_config().unwrap();
        assert_eq!(manifest.workspace, PathBuf::from("."));
        assert_eq!(manifest.package_root, PathBuf::new());
        assert!(manifest.include_build_number);

        let changelog = harness.changelog.to_config();
        assert_eq!(changelog.structure, DEFAULT_CHANGELOG_STRUCTURE);
        assert_eq!(changelog.head_ref, DEFAULT_HEAD_REF);

        let github = harness.github.to_config().unwrap();
        assert_eq!(github.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_naming_args_keep_whitespace() {
        let harness = parse(&["--tag-prefix", "v", "--tag-suffix", " beta"]);
        assert_eq!(harness.naming.to_config().tag_name("1.0.0"), "v1.0.0 beta");
    }

    #[test]
    fn test_github_args() {
        let harness = parse(&[
            "--repository",
            "octo/widgets",
            "--api-url",
            "https://ghe.example.com/api/v3",
            "--sha",
            "c0ffee",
            "--token",
            "secret",
        ]);
        let config = harness.github.to_config().unwrap();
        assert_eq!(config.repository, Some(RepoRef::new("octo", "widgets")));
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.sha.as_deref(), Some("c0ffee"));
        assert_eq!(config.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_bad_repository() {
        let harness = parse(&["--repository", "just-a-name"]);
        assert!(harness.github.to_config().is_err());
    }

    #[test]
    fn test_resolve_token() {
        assert_eq!(
            resolve_token(Some("a".into()), Some("b".into())).as_deref(),
            Some("a")
        );
        assert_eq!(
            resolve_token(Some(" ".into()), Some("b".into())).as_deref(),
            Some("b")
        );
        assert_eq!(resolve_token(None, None), None);
    }
}
