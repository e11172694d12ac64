//! Tag workflow orchestration
//!
//! One run: load the manifest, resolve the version and tag name, stop if the
//! tag exists, compose the message, create the tag object and its
//! reference, publish the outputs.

use pubtag_changelog::{ChangelogComposer, MessageSource};
use pubtag_core::config::TAG_LIST_LIMIT;
use pubtag_core::error::{ConfigError, Result};
use pubtag_core::types::{NewTag, RunOutputs, Tag};
use pubtag_core::{final_message, load_manifest, resolve_version, OutputSink, Reporter, TagConfig};
use pubtag_github::TagHost;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Receives the user-facing messages of a run
pub trait Notifier {
    fn warning(&mut self, message: &str);
    fn notice(&mut self, message: &str);
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TagOutcome {
    /// Tag object and reference were created
    Created {
        version: String,
        outputs: RunOutputs,
    },
    /// A tag with the computed name already existed
    AlreadyExists { version: String, tag_name: String },
    /// Dry run: what would have been created
    DryRun {
        version: String,
        tag_name: String,
        message: String,
    },
}

/// Drives one tagging run against a host
pub struct TagWorkflow<'a, H: TagHost + ?Sized> {
    config: &'a TagConfig,
    host: &'a H,
}

impl<'a, H: TagHost + ?Sized> TagWorkflow<'a, H> {
    pub fn new(config: &'a TagConfig, host: &'a H) -> Self {
        Self { config, host }
    }

    /// Execute the run.
    ///
    /// Any error clears the five tag outputs before it is returned.
    pub async fn execute(
        &self,
        sink: &mut dyn OutputSink,
        notifier: &mut dyn Notifier,
    ) -> Result<TagOutcome> {
        let result = self.run(&mut *sink, notifier).await;

        if let Err(e) = &result {
            warn!(error = %e, "tag run failed, clearing outputs");
            if let Err(clear_err) = Reporter::new(sink).cleared() {
                warn!(error = %clear_err, "failed to clear outputs");
            }
        }

        result
    }

    #[instrument(skip_all, fields(repo = %self.host.repository()))]
    async fn run(
        &self,
        sink: &mut dyn OutputSink,
        notifier: &mut dyn Notifier,
    ) -> Result<TagOutcome> {
        let mut reporter = Reporter::new(sink);

        let manifest = load_manifest(&self.config.manifest)?;
        let version = resolve_version(
            &manifest.version,
            self.config.manifest.include_build_number,
        );
        reporter.version(&version)?;
        debug!(version = %version, "detected version");

        let tags = existing_tags(self.host).await;
        let tag_name = self.config.naming.tag_name(&version);

        if let Some(existing) = tags.iter().find(|t| t.name == tag_name) {
            notifier.warning(&format!("\"{}\" tag already exists.", existing.name.trim()));
            reporter.tag_exists()?;
            return Ok(TagOutcome::AlreadyExists { version, tag_name });
        }

        let composed = ChangelogComposer::new(&self.config.changelog)
            .compose(self.host, &self.config.tag_message, &tags, &tag_name)
            .await;
        if let Some(warning) = composed.warning() {
            notifier.warning(&warning);
        }
        if let MessageSource::Changelog { base, commits } = &composed.source {
            debug!(base = %base, commits, "message composed from changelog");
        }
        let message = final_message(&composed.text, &version);

        if self.config.dry_run {
            info!(tag = %tag_name, "dry run, skipping tag creation");
            notifier.notice(&format!("Dry run: would create tag {}", tag_name));
            return Ok(TagOutcome::DryRun {
                version,
                tag_name,
                message,
            });
        }

        let sha = self
            .config
            .github
            .sha
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField("commit sha (GITHUB_SHA)".to_string()))?;

        let created = self
            .host
            .create_tag(&NewTag::for_commit(&tag_name, &message, sha))
            .await?;
        notifier.notice(&format!("Created new tag: {}", created.tag));

        let ref_name = format!("refs/tags/{}", created.tag);
        let reference = match self.host.create_ref(&ref_name, &created.sha).await {
            Ok(reference) => reference,
            Err(e) => {
                let repo = self.host.repository();
                warn!(
                    owner = %repo.owner,
                    repo = %repo.repo,
                    reference = %ref_name,
                    sha = %created.sha,
                    "reference creation failed"
                );
                return Err(e);
            }
        };
        notifier.notice(&format!(
            "Reference {} available at {}",
            reference.ref_name, reference.url
        ));

        let outputs = RunOutputs {
            tagname: tag_name,
            tagsha: created.sha,
            taguri: reference.url,
            tagmessage: message.trim().to_string(),
            tagref: reference.ref_name,
        };
        reporter.created(&outputs)?;

        Ok(TagOutcome::Created { version, outputs })
    }
}

/// First page of the repository's tags; listing failures count as "no tags"
pub async fn existing_tags<H: TagHost + ?Sized>(host: &H) -> Vec<Tag> {
    match host.list_tags(TAG_LIST_LIMIT).await {
        Ok(tags) => tags,
        Err(e) => {
            debug!(error = %e, "no tag found");
            Vec::new()
        }
    }
}
