//! Hosting service trait

use async_trait::async_trait;
use pubtag_core::error::Result;
use pubtag_core::types::{Commit, CreatedRef, CreatedTag, NewTag, RepoRef, Tag};

/// Operations a tagging run performs against the repository host
///
/// Implementations are bound to one repository.
#[async_trait]
pub trait TagHost: Send + Sync {
    /// Repository this host operates on
    fn repository(&self) -> &RepoRef;

    /// First page of tags, newest first
    async fn list_tags(&self, per_page: u8) -> Result<Vec<Tag>>;

    /// Commits reachable from `head` but not from `base`, oldest first
    async fn compare_commits(&self, base: &str, head: &str) -> Result<Vec<Commit>>;

    /// Create an annotated tag object
    async fn create_tag(&self, tag: &NewTag) -> Result<CreatedTag>;

    /// Create a reference pointing at `sha`
    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<CreatedRef>;
}
