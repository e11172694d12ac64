//! Version command

use clap::Args;
use console::style;
use tracing::info;

use pubtag_core::{load_manifest, resolve_version};

use crate::cli::args::{ManifestArgs, NamingArgs};
use crate::cli::{output, Cli, OutputFormat};

/// Show the manifest version and the tag name it maps to
#[derive(Debug, Args)]
pub struct VersionCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    #[command(flatten)]
    pub naming: NamingArgs,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let manifest_config = self.manifest.to_config()?;
        info!(manifest = %manifest_config.manifest_path().display(), "executing version command");

        let manifest = load_manifest(&manifest_config)?;
        let version = resolve_version(&manifest.version, manifest_config.include_build_number);
        let tag_name = self.naming.to_config().tag_name(&version);

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "package": manifest.name,
                    "declared": manifest.version,
                    "version": version,
                    "tag": tag_name,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text if cli.quiet => {
                println!("{}", version);
            }
            OutputFormat::Text => {
                println!("{}", output::header("Package Version"));
                println!();
                if let Some(name) = &manifest.name {
                    println!("  Package:   {}", style(name).cyan());
                }
                println!("  Manifest:  {}", style(manifest.path.display()).dim());
                println!("  Version:   {}", output::version_style().apply_to(&version));
                println!("  Tag:       {}", output::tag_style().apply_to(&tag_name));
            }
        }

        Ok(())
    }
}
