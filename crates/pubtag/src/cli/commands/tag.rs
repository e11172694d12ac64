//! Tag command

use clap::Args;
use console::style;
use tracing::{info, warn};

use pubtag_core::config::validate_config;
use pubtag_core::{GithubOutputFile, OutputSink, Reporter, StreamSink, TagConfig};
use pubtag_github::GitHubClient;

use super::runtime;
use crate::cli::args::{ChangelogArgs, GitHubArgs, ManifestArgs, NamingArgs};
use crate::cli::output::{self, ConsoleNotifier, Stream};
use crate::cli::{Cli, OutputFormat};
use crate::workflow::{TagOutcome, TagWorkflow};

/// Create the tag for the manifest version
#[derive(Debug, Args)]
pub struct TagCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    #[command(flatten)]
    pub naming: NamingArgs,

    #[command(flatten)]
    pub changelog: ChangelogArgs,

    #[command(flatten)]
    pub github: GitHubArgs,

    /// Step output file (default: print outputs to stdout)
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "FILE")]
    pub output_file: Option<String>,

    /// Resolve everything but create nothing
    #[arg(long)]
    pub dry_run: bool,
}

impl TagCommand {
    /// Execute the tag command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(dry_run = self.dry_run, "executing tag command");
        let mut sink = self.output_sink(cli);

        let (config, client) = match self.prepare() {
            Ok(prepared) => prepared,
            Err(e) => {
                if let Err(clear_err) = Reporter::new(sink.as_mut()).cleared() {
                    warn!(error = %clear_err, "failed to clear outputs");
                }
                return Err(e.into());
            }
        };

        let mut notifier = ConsoleNotifier::for_cli(cli);
        let workflow = TagWorkflow::new(&config, &client);
        let outcome = runtime()?.block_on(workflow.execute(sink.as_mut(), &mut notifier))?;

        self.output_result(&outcome, cli)
    }

    /// Console stream for step outputs, `None` when an output file is set
    fn output_stream(&self, cli: &Cli) -> Option<Stream> {
        match self.output_file.as_deref().filter(|p| !p.is_empty()) {
            Some(_) => None,
            None => Some(Stream::for_format(cli.format)),
        }
    }

    fn output_sink(&self, cli: &Cli) -> Box<dyn OutputSink> {
        match self.output_stream(cli) {
            Some(Stream::Stdout) => Box::new(StreamSink::new(std::io::stdout())),
            Some(Stream::Stderr) => Box::new(StreamSink::new(std::io::stderr())),
            None => Box::new(GithubOutputFile::new(
                self.output_file.clone().unwrap_or_default(),
            )),
        }
    }

    /// Resolve and validate inputs, then build the API client
    fn prepare(&self) -> pubtag_core::Result<(TagConfig, GitHubClient)> {
        let config = TagConfig {
            manifest: self.manifest.to_config()?,
            naming: self.naming.to_config(),
            changelog: self.changelog.to_config(),
            github: self.github.to_config()?,
            tag_message: self.changelog.tag_message(),
            dry_run: self.dry_run,
        };
        validate_config(&config)?;

        let client = GitHubClient::new(&config.github)?;
        Ok((config, client))
    }

    fn output_result(&self, outcome: &TagOutcome, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                println!("{}", render_json(outcome)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    return Ok(());
                }
                match outcome {
                    TagOutcome::Created { version, outputs } => {
                        output::success(&format!(
                            "Tagged {} as {}",
                            output::version_style().apply_to(version),
                            output::tag_style().apply_to(&outputs.tagname)
                        ));
                        if cli.verbose {
                            println!("{}", output::key_value("Object", &outputs.tagsha));
                            println!("{}", output::key_value("Reference", &outputs.tagref));
                            println!("{}", output::key_value("URL", &outputs.taguri));
                        }
                    }
                    TagOutcome::AlreadyExists { version, tag_name } => {
                        println!(
                            "{} {} already tagged as {}",
                            style("=").dim(),
                            output::version_style().apply_to(version),
                            output::tag_style().apply_to(tag_name)
                        );
                    }
                    TagOutcome::DryRun {
                        version,
                        tag_name,
                        message,
                    } => {
                        println!("{}", output::header("Dry run"));
                        println!();
                        println!("{}", output::key_value("Version", version));
                        println!("{}", output::key_value("Tag", tag_name));
                        println!("{}", output::key_value("Message", message));
                    }
                }
            }
        }
        Ok(())
    }
}

/// The JSON document printed for `--format json`
fn render_json(outcome: &TagOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}
