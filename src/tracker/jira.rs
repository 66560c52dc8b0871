//! tracker::jira
//!
//! Jira implementation of [`IssueTracker`] using the REST API.
//!
//! # Endpoints
//!
//! - `GET {base}/rest/api/latest/issue/{key}` for a single issue
//! - `GET {base}/rest/api/2/search?jql=...&maxResults=N` for the epic search
//!
//! # Authentication
//!
//! The token is sent verbatim as the `Authorization` header value, so it
//! must already carry its scheme (`Basic ...` or `Bearer ...`). Without a
//! token no header is sent, which works for anonymous-readable instances.
//!
//! # Example
//!
//! ```ignore
//! use fixnotes::tracker::{IssueTracker, JiraTracker};
//!
//! let jira = JiraTracker::new("https://example.atlassian.net", Some(token), "DEV", 80);
//! let issue = jira.get_issue("DEV-123").await?;
//! println!("{}: {}", issue.key, issue.summary);
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{IssueRecord, IssueTracker, TrackerError};

/// Default Jira instance.
pub const DEFAULT_BASE_URL: &str = "https://cnvrgio.atlassian.net";

/// Default project the epic search is scoped to.
pub const DEFAULT_PROJECT: &str = "DEV";

/// Default page size for the epic search.
pub const DEFAULT_MAX_RESULTS: u32 = 80;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "fixnotes";

/// Jira REST client.
pub struct JiraTracker {
    client: Client,
    base_url: String,
    token: Option<String>,
    project: String,
    max_results: u32,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for JiraTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraTracker")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .field("project", &self.project)
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl JiraTracker {
    /// Create a Jira client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Instance root, e.g. `https://example.atlassian.net`
    /// * `token` - Raw `Authorization` header value, if any
    /// * `project` - Project key the epic search is restricted to
    /// * `max_results` - Page size for the epic search
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        project: impl Into<String>,
        max_results: u32,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            project: project.into(),
            max_results,
        }
    }

    /// The instance root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Result<HeaderMap, TrackerError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(token)
                .map_err(|_| TrackerError::AuthFailed("token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// JQL selecting every epic of `fix_version` in the configured project.
    pub fn epic_jql(&self, fix_version: &str) -> String {
        format!(
            "issuetype = Epic AND fixVersion = \"{}\" AND project = \"{}\"",
            fix_version.replace('"', "\\\""),
            self.project
        )
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
        what: &str,
    ) -> Result<T, TrackerError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<JiraErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.error_messages.into_iter().next())
                .unwrap_or_else(|| "Unknown error".to_string());

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    TrackerError::AuthFailed(format!("{}: {}", status.as_u16(), message))
                }
                StatusCode::NOT_FOUND => TrackerError::NotFound(what.to_string()),
                _ => TrackerError::ApiError {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        response
            .json()
            .await
            .map_err(|e| TrackerError::Malformed(format!("{}: {}", what, e)))
    }
}

#[async_trait]
impl IssueTracker for JiraTracker {
    fn name(&self) -> &'static str {
        "jira"
    }

    async fn get_issue(&self, key: &str) -> Result<IssueRecord, TrackerError> {
        let url = format!("{}/rest/api/latest/issue/{}", self.base_url, key);

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let issue: JiraIssue = self.handle_response(response, key).await?;
        Ok(issue.into())
    }

    async fn search_epics(&self, fix_version: &str) -> Result<Vec<IssueRecord>, TrackerError> {
        let url = format!("{}/rest/api/2/search", self.base_url);
        let jql = self.epic_jql(fix_version);
        let max_results = self.max_results.to_string();

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(&[("jql", jql.as_str()), ("maxResults", max_results.as_str())])
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let page: JiraSearchResponse = self.handle_response(response, &jql).await?;
        Ok(page.issues.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// Jira API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraFields {
    #[serde(rename = "issuetype")]
    issue_type: JiraNamed,
    summary: String,
    description: Option<String>,
    fix_versions: Vec<JiraNamed>,
}

#[derive(Debug, Deserialize)]
struct JiraNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct JiraSearchResponse {
    issues: Vec<JiraIssue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraErrorResponse {
    #[serde(default)]
    error_messages: Vec<String>,
}

impl From<JiraIssue> for IssueRecord {
    fn from(issue: JiraIssue) -> Self {
        IssueRecord {
            key: issue.key,
            issue_type: issue.fields.issue_type.name,
            summary: issue.fields.summary,
            description: issue.fields.description,
            fix_versions: issue
                .fields
                .fix_versions
                .into_iter()
                .map(|v| v.name)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jira() -> JiraTracker {
        JiraTracker::new("https://jira.example.com/", None, "DEV", 80)
    }

    #[test]
    fn tracker_is_named_jira() {
        assert_eq!(jira().name(), "jira");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(jira().base_url(), "https://jira.example.com");
    }

    #[test]
    fn epic_jql_scopes_project() {
        assert_eq!(
            jira().epic_jql("2.3"),
            "issuetype = Epic AND fixVersion = \"2.3\" AND project = \"DEV\""
        );
    }

    #[test]
    fn epic_jql_escapes_quotes() {
        assert!(jira().epic_jql("a\"b").contains("\"a\\\"b\""));
    }

    #[test]
    fn debug_hides_token() {
        let tracker = JiraTracker::new("https://x", Some("Bearer secret".into()), "DEV", 1);
        let debug = format!("{:?}", tracker);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("has_token: true"));
    }

    #[test]
    fn issue_json_maps_to_record() {
        let json = r#"{
            "key": "DEV-9",
            "fields": {
                "issuetype": {"name": "Bug"},
                "summary": "Crash on save",
                "description": null,
                "fixVersions": [{"name": "2.3"}, {"name": "master"}]
            }
        }"#;
        let issue: JiraIssue = serde_json::from_str(json).unwrap();
        let record: IssueRecord = issue.into();
        assert_eq!(record.key, "DEV-9");
        assert_eq!(record.issue_type, "Bug");
        assert_eq!(record.description, None);
        assert_eq!(record.fix_versions, vec!["2.3", "master"]);
    }

    #[test]
    fn missing_fix_versions_is_malformed() {
        let json = r#"{"key": "DEV-9", "fields": {"issuetype": {"name": "Bug"}, "summary": "x"}}"#;
        assert!(serde_json::from_str::<JiraIssue>(json).is_err());
    }
}
