//! Core types for pubtag

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Repository on the hosting service, `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Account or organization owning the repository
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoRef {
    /// Create a new RepoRef
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self::new(owner, repo))
            }
            _ => Err(ConfigError::InvalidValue {
                field: "repository".to_string(),
                message: format!("expected owner/repo, got '{}'", s),
            }),
        }
    }
}

/// An existing tag as listed by the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,
    /// Commit the tag points to
    pub sha: String,
}

impl Tag {
    /// Create a new Tag
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha: sha.into(),
        }
    }
}

/// A commit in a compared range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash
    pub sha: String,
    /// Full commit message, all lines
    pub message: String,
    /// Login of the author's account, when the service could associate one
    pub author_login: Option<String>,
}

impl Commit {
    /// Create a new Commit without author information
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            author_login: None,
        }
    }

    /// Set the author login
    pub fn with_author(mut self, login: impl Into<String>) -> Self {
        self.author_login = Some(login.into());
        self
    }

    /// First line of the message
    pub fn headline(&self) -> &str {
        self.message.split('\n').next().unwrap_or_default()
    }
}

/// Request body for an annotated tag object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTag {
    /// Tag name
    pub tag: String,
    /// Tag message
    pub message: String,
    /// SHA of the object being tagged
    pub object: String,
    /// Type of the tagged object
    #[serde(rename = "type")]
    pub object_type: String,
}

impl NewTag {
    /// Tag pointing at a commit
    pub fn for_commit(
        tag: impl Into<String>,
        message: impl Into<String>,
        commit_sha: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
            object: commit_sha.into(),
            object_type: "commit".to_string(),
        }
    }
}

/// Tag object returned after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTag {
    /// Tag name
    pub tag: String,
    /// SHA of the tag object itself
    pub sha: String,
    /// API URL of the tag object
    pub url: String,
    /// Stored tag message
    pub message: String,
}

/// Reference returned after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRef {
    /// Fully qualified reference name (`refs/tags/...`)
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// API URL of the reference
    pub url: String,
    /// SHA of the object the reference points to
    pub sha: String,
}

/// Values published once a tag and its reference exist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutputs {
    pub tagname: String,
    pub tagsha: String,
    pub taguri: String,
    pub tagmessage: String,
    pub tagref: String,
}

impl RunOutputs {
    /// All five outputs as empty strings
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Output name/value pairs in publishing order
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("tagname", &self.tagname),
            ("tagsha", &self.tagsha),
            ("taguri", &self.taguri),
            ("tagmessage", &self.tagmessage),
            ("tagref", &self.tagref),
        ]
    }
}
