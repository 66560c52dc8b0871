//! sink::ci
//!
//! Output values for the CI orchestrator.
//!
//! # Protocols
//!
//! - `set-output` (default): `::set-output name=NAME::VALUE` lines on stdout,
//!   with `%`, CR and LF percent-escaped.
//! - `github-output`: `NAME=VALUE` lines appended to the file named by
//!   `$GITHUB_OUTPUT`. Multi-line values use the heredoc form.
//!
//! Values are emitted in the order they were set.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::SinkError;

/// Heredoc delimiter for multi-line `github-output` values.
const HEREDOC_DELIMITER: &str = "FIXNOTES_EOF";

/// How output values reach the CI orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputProtocol {
    /// Legacy workflow command printed to stdout
    #[default]
    SetOutput,
    /// Append to the `$GITHUB_OUTPUT` file
    GithubOutput,
}

/// Named output values, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiOutputs {
    values: Vec<(String, String)>,
}

impl CiOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an earlier value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Legacy `::set-output` lines.
    pub fn set_output_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(name, value)| format!("::set-output name={}::{}", name, escape_command(value)))
            .collect()
    }

    /// `$GITHUB_OUTPUT` file contents for these values.
    pub fn github_output_text(&self) -> String {
        let mut text = String::new();
        for (name, value) in self.iter() {
            if value.contains('\n') {
                text.push_str(&format!(
                    "{name}<<{HEREDOC_DELIMITER}\n{value}\n{HEREDOC_DELIMITER}\n"
                ));
            } else {
                text.push_str(&format!("{name}={value}\n"));
            }
        }
        text
    }

    /// Emit the values using `protocol`.
    ///
    /// `stdout` receives set-output lines; `github_output` is the file for
    /// the other protocol. Without that file the legacy lines are printed
    /// instead, so values are never silently lost.
    pub fn emit(
        &self,
        protocol: OutputProtocol,
        stdout: &mut dyn Write,
        github_output: Option<&Path>,
    ) -> Result<OutputProtocol, SinkError> {
        match (protocol, github_output) {
            (OutputProtocol::GithubOutput, Some(path)) => {
                super::append(path, &self.github_output_text())?;
                Ok(OutputProtocol::GithubOutput)
            }
            _ => {
                for line in self.set_output_lines() {
                    writeln!(stdout, "{}", line).map_err(|source| SinkError::Write {
                        path: PathBuf::from("<stdout>"),
                        source,
                    })?;
                }
                Ok(OutputProtocol::SetOutput)
            }
        }
    }
}

/// Percent-escape a workflow command value.
fn escape_command(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
