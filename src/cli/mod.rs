//! cli
//!
//! Command-line interface layer for fixnotes.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Merge flags, environment and config files into one [`RunConfig`]
//! - Build the tracker and notifier, then hand off to the [`crate::engine`]
//! - Emit CI outputs and the optional notes echo on stdout
//!
//! # Architecture
//!
//! The CLI layer is thin. The engine is async; the CLI owns the tokio
//! runtime and blocks on a single run.

pub mod args;

pub use args::{Cli, Mode};

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::core::config::Config;
use crate::core::render::MarkerCheck;
use crate::engine::{ChatDelivery, CommitRange, OutputPaths, Pipeline, RenderMode, RunConfig};
use crate::git::Git;
use crate::notify::SlackWebhook;
use crate::tracker::JiraTracker;
use crate::ui::{self, output, Verbosity};

/// File named by the CI runner for `github-output` values.
const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    ui::init_tracing(verbosity);

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot read current directory")?,
    };
    let git = Git::open(&cwd).with_context(|| format!("cannot open repository at {}", cwd.display()))?;

    let loaded = Config::load(git.work_dir(), cli.config.as_deref())
        .context("failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{}: {}", warning.path.display(), warning.message),
            verbosity,
        );
    }
    let config = loaded.config;

    let mode = RenderMode::from(cli.mode);
    let webhook_url = cli
        .slack_webhook_url
        .clone()
        .or_else(|| config.slack_webhook_url());
    let chat = ChatDelivery::resolve(mode, cli.slack, webhook_url)?;

    let run_config = build_run_config(&cli, &config, Local::now().date_naive());
    let tracker = JiraTracker::new(
        config.jira_base_url(),
        cli.jira_token.clone(),
        config.jira_project(),
        config.jira_max_results(),
    );
    let slack = match chat {
        ChatDelivery::Webhook { url } => Some(SlackWebhook::new(url)),
        ChatDelivery::Off => None,
    };

    let mut pipeline =
        Pipeline::new(&git, &tracker).with_empty_check(MarkerCheck::new(config.empty_marker()));
    if let Some(slack) = &slack {
        pipeline = pipeline.with_notifier(slack);
    }

    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let report = rt
        .block_on(pipeline.run(&run_config))
        .with_context(|| format!("failed to generate release notes for {}", run_config.range))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let github_output = std::env::var_os(GITHUB_OUTPUT_ENV).map(PathBuf::from);
    report
        .outputs
        .emit(config.output_protocol(), &mut out, github_output.as_deref())
        .context("failed to emit CI outputs")?;

    if cli.print {
        let notes = match mode {
            RenderMode::WithKeyDualFile => &report.notes.with_keys,
            RenderMode::WithoutKeySingleFileWithChat => &report.notes.without_keys,
        };
        writeln!(out, "{}", notes).context("failed to print notes")?;
    }

    output::summary(&report, verbosity);
    Ok(())
}

/// Merge flags over config into the engine's run settings.
pub fn build_run_config(cli: &Cli, config: &Config, today: NaiveDate) -> RunConfig {
    RunConfig {
        range: CommitRange::new(cli.from_version.clone(), cli.to_version.clone()),
        mode: RenderMode::from(cli.mode),
        remote: config.remote(),
        outputs: OutputPaths {
            dir: output_dir(cli.output_dir.as_deref(), config),
            notes_file: config.notes_file(),
            notes_without_keys_file: config.notes_without_keys_file(),
            changelog_file: config.changelog_file(),
        },
        repo_name: cli.repo_name.clone(),
        release_date: today,
    }
}

fn output_dir(flag: Option<&Path>, config: &Config) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_dir())
}
