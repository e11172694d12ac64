//! Commit line templates
//!
//! A template is free text with `{{name}}` placeholders. Each commit is
//! rendered by substituting every recognized placeholder in a single
//! left-to-right pass; substituted text is not scanned again and unknown
//! placeholders are kept verbatim.

use pubtag_core::config::DEFAULT_CHANGELOG_STRUCTURE;
use pubtag_core::types::Commit;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Any `{{word}}` sequence; the name is resolved through [`Placeholder`]
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(?P<name>\w+)\}\}").expect("Invalid regex"));

/// Placeholders a template may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Full commit message
    Message,
    /// First line of the commit message
    MessageHeadline,
    /// Author login, empty when unknown
    Author,
    /// Commit hash
    Sha,
}

impl Placeholder {
    /// Every recognized placeholder
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Message,
        Placeholder::MessageHeadline,
        Placeholder::Author,
        Placeholder::Sha,
    ];

    /// Name used between the braces
    pub fn name(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::MessageHeadline => "messageHeadline",
            Self::Author => "author",
            Self::Sha => "sha",
        }
    }

    /// Look up a placeholder by name, case-sensitive
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Value substituted for this placeholder
    pub fn resolve(self, commit: &Commit) -> &str {
        match self {
            Self::Message => &commit.message,
            Self::MessageHeadline => commit.headline(),
            Self::Author => commit.author_login.as_deref().unwrap_or_default(),
            Self::Sha => &commit.sha,
        }
    }
}

/// Per-commit changelog template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogTemplate {
    source: String,
}

impl ChangelogTemplate {
    /// Create a template; an empty source selects the default
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        if source.is_empty() {
            Self::default()
        } else {
            Self { source }
        }
    }

    /// Template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render one commit
    pub fn render(&self, commit: &Commit) -> String {
        PLACEHOLDER_REGEX
            .replace_all(&self.source, |caps: &Captures<'_>| {
                match Placeholder::from_name(&caps["name"]) {
                    Some(placeholder) => placeholder.resolve(commit).to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Render every commit, in order, joined by newlines
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn render_all(&self, commits: &[Commit]) -> String {
        let rendered = commits
            .iter()
            .map(|c| self.render(c))
            .collect::<Vec<_>>()
            .join("\n");
        debug!(output_len = rendered.len(), "commits rendered");
        rendered
    }
}

impl Default for ChangelogTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_CHANGELOG_STRUCTURE.to_string(),
        }
    }
}
