//! Output formatting utilities
//!
//! Under GitHub Actions (`GITHUB_ACTIONS=true`) messages are printed as
//! workflow commands so they show up as run annotations; elsewhere they
//! are styled console lines.

use console::{style, Style};

use crate::cli::{Cli, OutputFormat};
use crate::workflow::Notifier;

/// Whether the process runs inside a GitHub Actions job
fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Escape a message for a workflow command
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn command(name: &str, message: &str) -> String {
    format!("::{}::{}", name, escape_data(message))
}

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message to stderr; under Actions this fails the step visibly
pub fn error(message: &str) {
    if is_github_actions() {
        eprintln!("{}", command("error", message));
    } else {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }
}

/// Warning line: a workflow command under Actions, styled otherwise
fn warning_line(message: &str) -> String {
    if is_github_actions() {
        command("warning", message)
    } else {
        format!("{} {}", style("!").yellow().bold(), message)
    }
}

/// Notice line: a workflow command under Actions, styled otherwise
fn notice_line(message: &str) -> String {
    if is_github_actions() {
        command("notice", message)
    } else {
        format!("{} {}", style("→").blue(), message)
    }
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for tags
pub fn tag_style() -> Style {
    Style::new().yellow()
}

/// Console stream for everything that is not the command's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// With JSON output stdout carries the document alone
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Stdout,
            OutputFormat::Json => Self::Stderr,
        }
    }

    fn print(self, line: &str) {
        match self {
            Self::Stdout => println!("{}", line),
            Self::Stderr => eprintln!("{}", line),
        }
    }
}

/// Routes workflow messages to the console or to annotations
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    stream: Stream,
    quiet: bool,
}

impl ConsoleNotifier {
    /// Notifier honouring `--format` and `--quiet`
    pub fn for_cli(cli: &Cli) -> Self {
        Self {
            stream: Stream::for_format(cli.format),
            quiet: cli.quiet,
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn warning(&mut self, message: &str) {
        self.stream.print(&warning_line(message));
    }

    /// Notices are dropped under `--quiet`
    fn notice(&mut self, message: &str) {
        if !self.quiet {
            self.stream.print(&notice_line(message));
        }
    }
}
