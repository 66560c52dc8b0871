//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! fixnotes has two configuration scopes:
//! - **Global**: User or CI-runner level settings
//! - **Repo**: `.fixnotes.toml` at the repository root
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags and environment (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `--config <path>` if given (must exist)
//! 2. `$FIXNOTES_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/fixnotes/config.toml`
//! 4. `~/.fixnotes/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use fixnotes::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo")), None).unwrap();
//! let config = result.config;
//!
//! println!("Jira: {}", config.jira_base_url());
//! println!("Remote: {}", config.remote());
//! ```

pub mod schema;

pub use schema::{FileConfig, GitConfig, JiraConfig, NotesConfig, OutputConfig, SlackConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::render::MarkerCheck;
use crate::sink::OutputProtocol;
use crate::tracker::jira::{DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS, DEFAULT_PROJECT};

/// Repo-local config file name.
pub const REPO_CONFIG_FILE: &str = ".fixnotes.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules automatically: repo config
/// overrides global config, which overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Repository configuration (if present)
    pub repo: Option<FileConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// `repo_root` enables the repo-local file; `explicit` replaces the
    /// global search with a single required file.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// validated, or if `explicit` cannot be read. Missing default files are
    /// not an error.
    pub fn load(
        repo_root: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match explicit {
            Some(path) => (Self::read_config(path)?, Some(path.to_path_buf())),
            None => Self::load_global()?,
        };

        let (repo, repo_path) = match repo_root {
            Some(root) => Self::load_repo(root, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    fn load_global() -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
        for path in Self::global_candidates() {
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }
        Ok((FileConfig::default(), None))
    }

    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var("FIXNOTES_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("fixnotes/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".fixnotes/config.toml"));
        }
        candidates
    }

    fn load_repo(
        repo_root: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigError> {
        let path = repo_root.join(REPO_CONFIG_FILE);
        if !path.exists() {
            return Ok((None, None));
        }

        let config = Self::read_config(&path)?;
        if config
            .slack
            .as_ref()
            .and_then(|s| s.webhook_url.as_ref())
            .is_some()
        {
            warnings.push(ConfigWarning {
                message: "slack.webhook_url is a secret; prefer SLACK_WEBHOOK_URL over a checked-in file"
                    .to_string(),
                path: path.clone(),
            });
        }
        Ok((Some(config), Some(path)))
    }

    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Repo value if set, else global value.
    fn pick<T>(&self, get: impl Fn(&FileConfig) -> Option<T>) -> Option<T> {
        self.repo.as_ref().and_then(&get).or_else(|| get(&self.global))
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Jira instance root. Defaults to [`DEFAULT_BASE_URL`].
    pub fn jira_base_url(&self) -> String {
        self.pick(|c| c.jira.as_ref()?.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Project of the epic search. Defaults to [`DEFAULT_PROJECT`].
    pub fn jira_project(&self) -> String {
        self.pick(|c| c.jira.as_ref()?.project.clone())
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string())
    }

    /// Epic search page size. Defaults to [`DEFAULT_MAX_RESULTS`].
    pub fn jira_max_results(&self) -> u32 {
        self.pick(|c| c.jira.as_ref()?.max_results)
            .unwrap_or(DEFAULT_MAX_RESULTS)
    }

    /// Remote name. Defaults to "origin".
    pub fn remote(&self) -> String {
        self.pick(|c| c.git.as_ref()?.remote.clone())
            .unwrap_or_else(|| "origin".to_string())
    }

    /// Output directory. Defaults to `/tmp`.
    pub fn output_dir(&self) -> PathBuf {
        self.pick(|c| c.output.as_ref()?.dir.clone())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/tmp"))
    }

    /// File name of the notes with keys. Defaults to `release_notes.txt`.
    pub fn notes_file(&self) -> String {
        self.pick(|c| c.output.as_ref()?.notes_file.clone())
            .unwrap_or_else(|| "release_notes.txt".to_string())
    }

    /// File name of the keyless notes. Defaults to `release_notes_without_issues.txt`.
    pub fn notes_without_keys_file(&self) -> String {
        self.pick(|c| c.output.as_ref()?.notes_without_keys_file.clone())
            .unwrap_or_else(|| "release_notes_without_issues.txt".to_string())
    }

    /// File name of the appended changelog. Defaults to `CHANGELOG.md`.
    pub fn changelog_file(&self) -> String {
        self.pick(|c| c.output.as_ref()?.changelog_file.clone())
            .unwrap_or_else(|| "CHANGELOG.md".to_string())
    }

    /// CI output protocol. Defaults to the legacy `set-output` lines.
    pub fn output_protocol(&self) -> OutputProtocol {
        self.pick(|c| c.output.as_ref()?.protocol).unwrap_or_default()
    }

    /// Emptiness marker. Defaults to [`MarkerCheck::DEFAULT_MARKER`].
    pub fn empty_marker(&self) -> String {
        self.pick(|c| c.notes.as_ref()?.empty_marker.clone())
            .unwrap_or_else(|| MarkerCheck::DEFAULT_MARKER.to_string())
    }

    /// Chat webhook URL, if configured.
    pub fn slack_webhook_url(&self) -> Option<String> {
        self.pick(|c| c.slack.as_ref()?.webhook_url.clone())
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
