//! Exit codes for the CLI

use pubtag_core::PubtagError;

/// Success, including the tag-already-exists short-circuit
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Manifest missing or unreadable
pub const MANIFEST_ERROR: i32 = 3;

/// Hosting service call failed
pub const HOST_ERROR: i32 = 4;

/// Exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PubtagError>() {
        Some(PubtagError::Config(_)) => CONFIG_ERROR,
        Some(PubtagError::Manifest(_)) => MANIFEST_ERROR,
        Some(PubtagError::Host(_)) => HOST_ERROR,
        _ => ERROR,
    }
}
