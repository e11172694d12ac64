//! pubtag Changelog - tag messages from commit history
//!
//! This crate renders commits through a placeholder template and composes
//! the message of a new tag from the commits since the previous one.

pub mod composer;
pub mod template;

pub use composer::{ChangelogComposer, ComposedMessage, MessageSource};
pub use template::{ChangelogTemplate, Placeholder};
