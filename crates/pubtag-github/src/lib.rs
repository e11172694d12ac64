//! pubtag GitHub - hosting service access
//!
//! This crate defines the [`TagHost`] operations a tagging run needs and
//! implements them against the GitHub REST API.

mod api;
mod client;
mod traits;

pub use client::GitHubClient;
pub use traits::TagHost;
