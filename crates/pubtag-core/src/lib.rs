//! pubtag Core - Core library for tagging a package version
//!
//! This crate provides the error types, configuration, manifest loading,
//! version resolution and step output handling shared by the pubtag crates.

pub mod config;
pub mod error;
pub mod manifest;
pub mod outputs;
pub mod types;
pub mod version;

pub use config::TagConfig;
pub use error::{ConfigError, HostError, ManifestError, OutputError, PubtagError, Result};
pub use manifest::{load_manifest, Manifest};
pub use outputs::{GithubOutputFile, MemoryOutputs, OutputSink, Reporter, StreamSink};
pub use types::{Commit, CreatedRef, CreatedTag, NewTag, RepoRef, RunOutputs, Tag};
pub use version::{final_message, resolve_version};
