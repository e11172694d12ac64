//! GitHub REST payloads
//!
//! Only the fields pubtag reads are declared; everything else in the
//! responses is ignored.

use pubtag_core::types::{Commit, CreatedRef, CreatedTag, Tag};
use serde::{Deserialize, Serialize};

/// Entry of `GET /repos/{owner}/{repo}/tags`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiTag {
    pub name: String,
    pub commit: ApiObjectRef,
}

/// `{ "sha": ... }` pointer used by several payloads
#[derive(Debug, Deserialize)]
pub(crate) struct ApiObjectRef {
    pub sha: String,
}

/// Body of `GET /repos/{owner}/{repo}/compare/{base}...{head}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiComparison {
    #[serde(default)]
    pub commits: Vec<ApiCommit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCommit {
    pub sha: String,
    pub commit: ApiCommitDetail,
    /// Null when the author email is not linked to an account
    #[serde(default)]
    pub author: Option<ApiUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCommitDetail {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiUser {
    #[serde(default)]
    pub login: Option<String>,
}

/// Response of `POST /repos/{owner}/{repo}/git/tags`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiTagObject {
    pub tag: String,
    pub sha: String,
    pub url: String,
    #[serde(default)]
    pub message: String,
}

/// Request body of `POST /repos/{owner}/{repo}/git/refs`
#[derive(Debug, Serialize)]
pub(crate) struct ApiNewRef<'a> {
    #[serde(rename = "ref")]
    pub ref_name: &'a str,
    pub sha: &'a str,
}

/// Response of `POST /repos/{owner}/{repo}/git/refs`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub url: String,
    pub object: ApiObjectRef,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}

impl From<ApiTag> for Tag {
    fn from(tag: ApiTag) -> Self {
        Tag::new(tag.name, tag.commit.sha)
    }
}

impl From<ApiCommit> for Commit {
    fn from(commit: ApiCommit) -> Self {
        Commit {
            sha: commit.sha,
            message: commit.commit.message,
            author_login: commit.author.and_then(|a| a.login),
        }
    }
}

impl From<ApiTagObject> for CreatedTag {
    fn from(tag: ApiTagObject) -> Self {
        CreatedTag {
            tag: tag.tag,
            sha: tag.sha,
            url: tag.url,
            message: tag.message,
        }
    }
}

impl From<ApiRef> for CreatedRef {
    fn from(reference: ApiRef) -> Self {
        CreatedRef {
            ref_name: reference.ref_name,
            url: reference.url,
            sha: reference.object.sha,
        }
    }
}

/// Human-readable message from an error response body
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.trim().to_string())
}
