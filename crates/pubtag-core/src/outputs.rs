//! Step outputs
//!
//! Outputs are named string values handed to later workflow steps. On
//! GitHub Actions they are appended to the file named by `GITHUB_OUTPUT`;
//! elsewhere they are written to a console stream. Both use the multi-line
//! block form `name<<DELIMITER\nvalue\nDELIMITER`.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;
use uuid::Uuid;

use crate::error::{OutputError, Result};
use crate::types::RunOutputs;

/// Name of the version output
pub const VERSION_OUTPUT: &str = "version";

/// Destination for step outputs
pub trait OutputSink {
    /// Publish one output, replacing any earlier value with the same name
    fn set(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Write one output block with a fresh random delimiter
fn write_block<W: Write>(out: &mut W, name: &str, value: &str) -> Result<()> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(OutputError::DelimiterCollision(name.to_string()).into());
    }

    write!(out, "{name}<<{delimiter}\n{value}\n{delimiter}\n")
        .and_then(|()| out.flush())
        .map_err(|source| OutputError::Write {
            name: name.to_string(),
            source,
        })?;
    Ok(())
}

/// Appends outputs to a GitHub Actions output file
#[derive(Debug, Clone)]
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for GithubOutputFile {
    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| OutputError::Write {
                name: name.to_string(),
                source,
            })?;

        write_block(&mut file, name, value)?;
        debug!(name, path = %self.path.display(), "output written");
        Ok(())
    }
}

/// Writes output blocks to a stream, for runs outside GitHub Actions
#[derive(Debug)]
pub struct StreamSink<W> {
    out: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> OutputSink for StreamSink<W> {
    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        write_block(&mut self.out, name, value)
    }
}

/// Keeps outputs in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryOutputs {
    values: BTreeMap<String, String>,
}

impl MemoryOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an output, `None` if it was never set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of distinct outputs set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OutputSink for MemoryOutputs {
    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Publishes the fixed output sets of a run
pub struct Reporter<'a> {
    sink: &'a mut dyn OutputSink,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a mut dyn OutputSink) -> Self {
        Self { sink }
    }

    /// Publish the resolved version
    pub fn version(&mut self, version: &str) -> Result<()> {
        self.sink.set(VERSION_OUTPUT, version)
    }

    /// Publish all five outputs of a created tag
    pub fn created(&mut self, outputs: &RunOutputs) -> Result<()> {
        self.publish(outputs)
    }

    /// The tag already existed: only `tagname` is cleared
    pub fn tag_exists(&mut self) -> Result<()> {
        self.sink.set("tagname", "")
    }

    /// The run failed: all five outputs are cleared
    pub fn cleared(&mut self) -> Result<()> {
        self.publish(&RunOutputs::cleared())
    }

    fn publish(&mut self, outputs: &RunOutputs) -> Result<()> {
        for (name, value) in outputs.pairs() {
            self.sink.set(name, value)?;
        }
        Ok(())
    }
}
