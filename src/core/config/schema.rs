//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the global file and the repo-local
//! `.fixnotes.toml`; repo values override global ones key by key.
//!
//! # Validation
//!
//! Config values are validated after parsing so that a typo in a URL or an
//! empty remote name fails before any network call is made.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::sink::OutputProtocol;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// [jira]
/// base_url = "https://example.atlassian.net"
/// project = "DEV"
/// max_results = 80
///
/// [git]
/// remote = "origin"
///
/// [output]
/// dir = "/tmp"
/// protocol = "set-output"
///
/// [notes]
/// empty_marker = "dev"
///
/// [slack]
/// webhook_url = "https://hooks.slack.com/services/..."
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub jira: Option<JiraConfig>,
    pub git: Option<GitConfig>,
    pub output: Option<OutputConfig>,
    pub notes: Option<NotesConfig>,
    pub slack: Option<SlackConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(jira) = &self.jira {
            jira.validate()?;
        }

        if let Some(remote) = self.git.as_ref().and_then(|g| g.remote.as_ref()) {
            if remote.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "git.remote cannot be empty".to_string(),
                ));
            }
        }

        if let Some(output) = &self.output {
            output.validate()?;
        }

        if let Some(marker) = self.notes.as_ref().and_then(|n| n.empty_marker.as_ref()) {
            if marker.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "notes.empty_marker cannot be empty".to_string(),
                ));
            }
        }

        if let Some(url) = self.slack.as_ref().and_then(|s| s.webhook_url.as_ref()) {
            validate_http_url("slack.webhook_url", url)?;
        }

        Ok(())
    }
}

/// Jira connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct JiraConfig {
    /// Instance root URL
    pub base_url: Option<String>,

    /// Project the epic search is restricted to
    pub project: Option<String>,

    /// Page size of the epic search
    pub max_results: Option<u32>,
}

impl JiraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url {
            validate_http_url("jira.base_url", url)?;
        }
        if let Some(project) = &self.project {
            if project.is_empty() || !project.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid jira.project '{}', must be alphanumeric",
                    project
                )));
            }
        }
        if self.max_results == Some(0) {
            return Err(ConfigError::InvalidValue(
                "jira.max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Repository settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Remote whose tracking refs are used when the start ref is not a tag
    pub remote: Option<String>,
}

/// Where notes are written and how paths are announced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory all output files are written under
    pub dir: Option<String>,

    /// Notes with issue keys (dual-file mode)
    pub notes_file: Option<String>,

    /// Notes without issue keys (dual-file mode)
    pub notes_without_keys_file: Option<String>,

    /// Changelog appended to in chat mode
    pub changelog_file: Option<String>,

    /// How output values are handed to CI
    pub protocol: Option<OutputProtocol>,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("output.notes_file", &self.notes_file),
            ("output.notes_without_keys_file", &self.notes_without_keys_file),
            ("output.changelog_file", &self.changelog_file),
        ];
        for (key, value) in names {
            if let Some(name) = value {
                if name.is_empty() || name.contains('/') || name.contains('\\') {
                    return Err(ConfigError::InvalidValue(format!(
                        "{} must be a plain file name, got '{}'",
                        key, name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Notes content settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NotesConfig {
    /// Substring whose absence marks the notes as empty
    pub empty_marker: Option<String>,
}

/// Chat webhook settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SlackConfig {
    pub webhook_url: Option<String>,
}

fn validate_http_url(key: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "{} must be an http(s) URL, got '{}'",
            key, url
        )))
    }
}
