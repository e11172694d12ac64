//! Package manifest loading
//!
//! The manifest is a `pubspec.yaml`; only its `version` field (and, for
//! display, `name`) is read.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info, instrument};

use crate::config::ManifestConfig;
use crate::error::{ManifestError, Result};

/// Parsed package manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// File the manifest was read from
    pub path: PathBuf,
    /// Package name, when declared
    pub name: Option<String>,
    /// Version exactly as declared, including any `+build` suffix
    pub version: String,
}

/// Load the manifest described by the configuration
#[instrument(skip(config), fields(workspace = %config.workspace.display()))]
pub fn load_manifest(config: &ManifestConfig) -> Result<Manifest> {
    log_workspace_listing(&config.workspace);

    let path = config.manifest_path();
    if !path.is_file() {
        return Err(ManifestError::NotFound(config.package_dir()).into());
    }

    info!(path = %path.display(), "loading manifest");
    let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
        path: path.clone(),
        source,
    })?;

    let manifest = parse_manifest(&content, &path)?;
    debug!(version = %manifest.version, name = ?manifest.name, "manifest loaded");
    Ok(manifest)
}

/// Parse manifest content read from `path`
pub fn parse_manifest(content: &str, path: &Path) -> Result<Manifest> {
    let document: Value = serde_yaml::from_str(content).map_err(ManifestError::Yaml)?;

    let version = match document.get("version") {
        None | Some(Value::Null) => return Err(ManifestError::MissingVersion.into()),
        Some(Value::String(s)) => s.clone(),
        // `1.10` would read back as `1.1`
        Some(Value::Number(n)) => {
            return Err(ManifestError::InvalidVersion(format!(
                "found the number {}, quote the version to keep it as written",
                n
            ))
            .into())
        }
        Some(other) => {
            return Err(ManifestError::InvalidVersion(format!(
                "expected a string, found {}",
                value_kind(other)
            ))
            .into())
        }
    };

    if version.is_empty() {
        return Err(ManifestError::MissingVersion.into());
    }

    let name = document
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Manifest {
        path: path.to_path_buf(),
        name,
        version,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Debug listing of the workspace root, directories first marker `> `
fn log_workspace_listing(workspace: &Path) {
    let Ok(entries) = std::fs::read_dir(workspace) else {
        debug!(workspace = %workspace.display(), "workspace directory not readable");
        return;
    };

    let listing = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let marker = if is_dir { "> " } else { "  - " };
            format!("{}{}", marker, entry.file_name().to_string_lossy())
        })
        .collect::<Vec<_>>()
        .join("\n");

    debug!("Working Directory: {}:\n{}", workspace.display(), listing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PubtagError;
    use tempfile::TempDir;

    fn config_for(temp: &TempDir, package_root: &str) -> ManifestConfig {
        ManifestConfig {
            workspace: temp.path().to_path_buf(),
            package_root: PathBuf::from(package_root),
            include_build_number: true,
        }
    }

    #[test]
    fn test_load_manifest() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("pubspec.yaml"),
            "name: my_app\nversion: 1.2.3+4\n",
        )
        .unwrap();

        let manifest = load_manifest(&config_for(&temp, "")).unwrap();
        assert_eq!(manifest.version, "1.2.3+4");
        assert_eq!(manifest.name.as_deref(), Some("my_app"));
    }

    #[test]
    fn test_load_manifest_from_package_root() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("packages").join("app");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(pkg.join("pubspec.yaml"), "version: \"2.0.0\"\n").unwrap();

        let manifest = load_manifest(&config_for(&temp, "packages/app")).unwrap();
        assert_eq!(manifest.version, "2.0.0");
        assert_eq!(manifest.path, pkg.join("pubspec.yaml"));
    }

    #[test]
    fn test_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let err = load_manifest(&config_for(&temp, "")).unwrap_err();
        assert!(matches!(err, PubtagError::Manifest(ManifestError::NotFound(_))));
    }

    #[test]
    fn test_missing_version() {
        let err = parse_manifest("name: my_app\n", Path::new("pubspec.yaml")).unwrap_err();
        assert!(matches!(err, PubtagError::Manifest(ManifestError::MissingVersion)));

        let err = parse_manifest("", Path::new("pubspec.yaml")).unwrap_err();
        assert!(matches!(err, PubtagError::Manifest(ManifestError::MissingVersion)));
    }

    #[test]
    fn test_numeric_version_is_rejected() {
        for content in ["version: 3\n", "version: 1.10\n"] {
            let err = parse_manifest(content, Path::new("pubspec.yaml")).unwrap_err();
            assert!(matches!(err, PubtagError::Manifest(ManifestError::InvalidVersion(_))));
        }

        let manifest = parse_manifest("version: \"1.10\"\n", Path::new("pubspec.yaml")).unwrap();
        assert_eq!(manifest.version, "1.10");
    }

    #[test]
    fn test_version_kept_as_written() {
        let manifest = parse_manifest("version: \" 1.0.0 \"\n", Path::new("pubspec.yaml")).unwrap();
        assert_eq!(manifest.version, " 1.0.0 ");
    }

    #[test]
    fn test_non_scalar_version() {
        let err = parse_manifest("version:\n  - 1\n", Path::new("pubspec.yaml")).unwrap_err();
        assert!(matches!(err, PubtagError::Manifest(ManifestError::InvalidVersion(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_manifest("version: [1.0", Path::new("pubspec.yaml")).unwrap_err();
        assert!(matches!(err, PubtagError::Manifest(ManifestError::Yaml(_))));
    }
}
