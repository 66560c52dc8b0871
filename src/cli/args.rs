//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Secrets
//!
//! `--jira-token` and `--slack-webhook-url` fall back to the `JIRA_TOKEN`
//! and `SLACK_WEBHOOK_URL` environment variables. Their values are hidden
//! from `--help` output.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::engine::RenderMode;

/// fixnotes - release notes from git history and Jira fix versions
#[derive(Parser, Debug)]
#[command(name = "fixnotes")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Notes between two tags, written to /tmp/release_notes*.txt
    fixnotes --from-version v2.2.0 --to-version v2.3.0 --jira-token \"$JIRA_TOKEN\"

    # Everything since the last tag, appended to CHANGELOG.md and posted to Slack
    fixnotes --from-version v2.3.0 --mode without-key-single-file-with-chat \\
        --slack --repo-name api --output-dir .")]
pub struct Cli {
    /// Start of the range (tag or branch); commits after it are included
    #[arg(long, value_name = "REF")]
    pub from_version: String,

    /// End of the range; omit to read up to HEAD
    #[arg(long, value_name = "REF")]
    pub to_version: Option<String>,

    /// Value sent verbatim as the Jira Authorization header
    #[arg(long, env = "JIRA_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub jira_token: Option<String>,

    /// What to render and where to write it
    #[arg(long, value_enum, default_value_t = Mode::WithKeyDualFile)]
    pub mode: Mode,

    /// Post the notes to the Slack webhook (chat mode only)
    #[arg(long)]
    pub slack: bool,

    /// Repository name shown in the chat header
    #[arg(long, value_name = "NAME")]
    pub repo_name: Option<String>,

    /// Slack incoming-webhook URL
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true, value_name = "URL")]
    pub slack_webhook_url: Option<String>,

    /// Run as if fixnotes was started in this directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Read this config file instead of searching the default locations
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for notes files (overrides output.dir)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also print the rendered notes to stdout
    #[arg(long)]
    pub print: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Rendering mode as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// With-key and without-key notes, one file each
    WithKeyDualFile,
    /// Without-key notes appended to a changelog, optional chat post
    WithoutKeySingleFileWithChat,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::WithKeyDualFile => RenderMode::WithKeyDualFile,
            Mode::WithoutKeySingleFileWithChat => RenderMode::WithoutKeySingleFileWithChat,
        }
    }
}
