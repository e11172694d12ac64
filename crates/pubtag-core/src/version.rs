//! Version and tag message resolution

/// Version used for tagging.
///
/// With `include_build_number` the declared version is kept whole, otherwise
/// everything from the first `+` on is dropped.
pub fn resolve_version(declared: &str, include_build_number: bool) -> String {
    if include_build_number {
        declared.to_string()
    } else {
        declared.split('+').next().unwrap_or_default().to_string()
    }
}

/// Message stored on the tag object: the trimmed message, or
/// `Version <version>` when nothing is left after trimming.
pub fn final_message(message: &str, version: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        format!("Version {}", version)
    } else {
        trimmed.to_string()
    }
}
