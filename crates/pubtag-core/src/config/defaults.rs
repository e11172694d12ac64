//! Default configuration values

use crate::error::ConfigError;

/// Manifest file looked up under the package root
pub const MANIFEST_FILE: &str = "pubspec.yaml";

/// Changelog line template used when none is supplied
pub const DEFAULT_CHANGELOG_STRUCTURE: &str = "**{{message}}** {{sha}})\n";

/// Branch the changelog range ends at
pub const DEFAULT_HEAD_REF: &str = "main";

/// GitHub REST API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size for the tag listing; only the first page is read
pub const TAG_LIST_LIMIT: u8 = 100;

/// Parse a boolean step input.
///
/// Empty or whitespace-only input yields `default`. Accepted literals follow
/// the YAML 1.2 core schema: `true | True | TRUE | false | False | FALSE`.
pub fn parse_bool_input(field: &str, value: &str, default: bool) -> Result<bool, ConfigError> {
    match value.trim() {
        "" => Ok(default),
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!(
                "'{}' is not a boolean (use true | True | TRUE | false | False | FALSE)",
                other
            ),
        }),
    }
}
