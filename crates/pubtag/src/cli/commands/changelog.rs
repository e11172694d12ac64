//! Changelog command

use clap::Args;
use tracing::info;

use pubtag_changelog::{ChangelogComposer, MessageSource};
use pubtag_core::config::validate_api_access;
use pubtag_core::{final_message, load_manifest, resolve_version};
use pubtag_github::GitHubClient;

use super::runtime;
use crate::cli::args::{ChangelogArgs, GitHubArgs, ManifestArgs, NamingArgs};
use crate::cli::output::{self, ConsoleNotifier};
use crate::cli::{Cli, OutputFormat};
use crate::workflow::{existing_tags, Notifier};

/// Show the message the next tag would carry
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    #[command(flatten)]
    pub naming: NamingArgs,

    #[command(flatten)]
    pub changelog: ChangelogArgs,

    #[command(flatten)]
    pub github: GitHubArgs,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing changelog command");
        let manifest_config = self.manifest.to_config()?;
        let github = self.github.to_config()?;
        validate_api_access(&github)?;

        let manifest = load_manifest(&manifest_config)?;
        let version = resolve_version(&manifest.version, manifest_config.include_build_number);
        let tag_name = self.naming.to_config().tag_name(&version);

        let client = GitHubClient::new(&github)?;
        let composer = ChangelogComposer::new(&self.changelog.to_config());
        let supplied = self.changelog.tag_message();

        let composed = runtime()?.block_on(async {
            let tags = existing_tags(&client).await;
            composer.compose(&client, &supplied, &tags, &tag_name).await
        });

        if let Some(warning) = composed.warning() {
            ConsoleNotifier::for_cli(cli).warning(&warning);
        }
        let message = final_message(&composed.text, &version);
        let base = match &composed.source {
            MessageSource::Changelog { base, .. } => Some(base.as_str()),
            _ => None,
        };

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "version": version,
                    "tag": tag_name,
                    "since": base,
                    "message": message,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    let title = match base {
                        Some(base) => format!("Changes since {}", output::tag_style().apply_to(base)),
                        None => format!("Message for {}", output::tag_style().apply_to(&tag_name)),
                    };
                    println!("{}", output::header(&title));
                    println!();
                }
                println!("{}", message);
            }
        }

        Ok(())
    }
}
