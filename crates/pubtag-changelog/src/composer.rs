//! Tag message composition

use pubtag_core::config::ChangelogConfig;
use pubtag_core::error::Result;
use pubtag_core::types::{Commit, Tag};
use pubtag_github::TagHost;
use tracing::{debug, info, instrument, warn};

use crate::template::ChangelogTemplate;

/// Where a composed message came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    /// A non-empty message was supplied
    Supplied,
    /// No earlier tag to compare against; message left empty
    NoPriorTag,
    /// Rendered from the commits since `base`
    Changelog { base: String, commits: usize },
    /// The comparison failed and the tag name was used instead
    CompareFailed { error: String },
}

/// Message for a new tag, before the final `Version <x>` fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub text: String,
    pub source: MessageSource,
}

impl ComposedMessage {
    /// Warning to surface to the user, if composition degraded
    pub fn warning(&self) -> Option<String> {
        match &self.source {
            MessageSource::CompareFailed { error } => Some(format!(
                "Failed to generate changelog from commits: {}",
                error
            )),
            _ => None,
        }
    }
}

/// Builds tag messages from the commits since the latest tag
#[derive(Debug, Clone)]
pub struct ChangelogComposer {
    template: ChangelogTemplate,
    head_ref: String,
}

impl ChangelogComposer {
    /// Create a composer from configuration
    pub fn new(config: &ChangelogConfig) -> Self {
        Self {
            template: ChangelogTemplate::new(config.structure.clone()),
            head_ref: config.head_ref.clone(),
        }
    }

    /// Template in use
    pub fn template(&self) -> &ChangelogTemplate {
        &self.template
    }

    /// Render commits with the configured template
    pub fn render(&self, commits: &[Commit]) -> String {
        self.template.render_all(commits)
    }

    /// Resolve the message for `tag_name`.
    ///
    /// A non-empty `supplied` message wins. Otherwise, when `tags` is not
    /// empty, the commits between its first entry and the head ref are
    /// rendered. A failed comparison falls back to the tag name.
    #[instrument(skip(self, host, supplied, tags), fields(tag_count = tags.len()))]
    pub async fn compose<H>(
        &self,
        host: &H,
        supplied: &str,
        tags: &[Tag],
        tag_name: &str,
    ) -> ComposedMessage
    where
        H: TagHost + ?Sized,
    {
        let supplied = supplied.trim();
        if !supplied.is_empty() {
            return ComposedMessage {
                text: supplied.to_string(),
                source: MessageSource::Supplied,
            };
        }

        let Some(latest) = tags.first() else {
            debug!("no earlier tag, skipping changelog");
            return ComposedMessage {
                text: String::new(),
                source: MessageSource::NoPriorTag,
            };
        };

        match self.changelog_since(host, latest).await {
            Ok((text, commits)) => ComposedMessage {
                text,
                source: MessageSource::Changelog {
                    base: latest.name.clone(),
                    commits,
                },
            },
            Err(e) => {
                warn!(base = %latest.name, error = %e, "changelog comparison failed, using tag name");
                ComposedMessage {
                    text: tag_name.to_string(),
                    source: MessageSource::CompareFailed {
                        error: e.to_string(),
                    },
                }
            }
        }
    }

    async fn changelog_since<H>(&self, host: &H, latest: &Tag) -> Result<(String, usize)>
    where
        H: TagHost + ?Sized,
    {
        let commits = host.compare_commits(&latest.name, &self.head_ref).await?;
        info!(
            base = %latest.name,
            head = %self.head_ref,
            commit_count = commits.len(),
            "composing changelog"
        );
        Ok((self.render(&commits), commits.len()))
    }
}
